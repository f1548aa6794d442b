use winazure_core::{Context, Error, Result};

use crate::constants::*;

/// Config carries the subscription and endpoint of the management API.
#[derive(Debug, Clone)]
pub struct Config {
    /// `subscription_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `AZURE_SUBSCRIPTION_ID`
    pub subscription_id: Option<String>,
    /// Path to a PEM file holding the management certificate and its private key.
    ///
    /// - this field if it's `is_some`
    /// - env value: `AZURE_MANAGEMENT_CERT`
    pub certificate_path: Option<String>,
    /// Management endpoint, `https://management.core.windows.net` by default.
    ///
    /// Overridden by env value `AZURE_MANAGEMENT_ENDPOINT` in [`Config::from_env`].
    pub endpoint: String,
    /// Value sent in `x-ms-version`.
    pub api_version: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            subscription_id: None,
            certificate_path: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl Config {
    /// Create a config for the given subscription and certificate.
    pub fn new(subscription_id: &str, certificate_path: &str) -> Self {
        Self {
            subscription_id: Some(subscription_id.to_string()),
            certificate_path: Some(certificate_path.to_string()),
            ..Default::default()
        }
    }

    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if self.subscription_id.is_none() {
            self.subscription_id = ctx.env_var(AZURE_SUBSCRIPTION_ID);
        }
        if self.certificate_path.is_none() {
            self.certificate_path = ctx.env_var(AZURE_MANAGEMENT_CERT);
        }
        if let Some(v) = ctx.env_var(AZURE_MANAGEMENT_ENDPOINT) {
            self.endpoint = v;
        }

        self
    }

    /// Set the management endpoint.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// Set the api version.
    pub fn with_api_version(mut self, api_version: &str) -> Self {
        self.api_version = api_version.to_string();
        self
    }

    pub(crate) fn require_subscription_id(&self) -> Result<&str> {
        match self.subscription_id.as_deref() {
            Some(v) if !v.is_empty() => Ok(v),
            _ => Err(Error::config_invalid("subscription_id is required")),
        }
    }

    pub(crate) fn require_certificate_path(&self) -> Result<&str> {
        match self.certificate_path.as_deref() {
            Some(v) if !v.is_empty() => Ok(v),
            _ => Err(Error::config_invalid("certificate_path is required")),
        }
    }
}
