use std::fmt::{Debug, Formatter};

use winazure_core::utils::Redact;
use winazure_core::{Context, Error, Result};

use crate::connection_string;
use crate::constants::*;
use crate::{CanonicalizationMode, Credential};

/// Storage services addressable with a Shared Key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// Blob service.
    Blob,
    /// Queue service.
    Queue,
    /// Table service.
    Table,
}

impl Service {
    /// Host of the local storage emulator for this service.
    pub fn development_host(&self) -> &'static str {
        match self {
            Service::Blob => DEVSTORE_BLOB_HOST,
            Service::Queue => DEVSTORE_QUEUE_HOST,
            Service::Table => DEVSTORE_TABLE_HOST,
        }
    }

    /// Public cloud host suffix for this service.
    pub fn cloud_host(&self) -> &'static str {
        match self {
            Service::Blob => CLOUD_BLOB_HOST,
            Service::Queue => CLOUD_QUEUE_HOST,
            Service::Table => CLOUD_TABLE_HOST,
        }
    }

    /// Canonicalization layout the service expects.
    pub fn mode(&self) -> CanonicalizationMode {
        match self {
            Service::Table => CanonicalizationMode::Table,
            Service::Blob | Service::Queue => CanonicalizationMode::Storage,
        }
    }
}

/// Config carries the account and endpoint settings of a storage account.
#[derive(Clone, Default)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Config {
    /// `account_name` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `AZURE_STORAGE_ACCOUNT`
    pub account_name: Option<String>,
    /// `account_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `AZURE_STORAGE_ACCESS_KEY`
    pub account_key: Option<String>,
    /// Host (and port) used instead of the service default.
    pub endpoint: Option<String>,
    /// Force path style uris on or off.
    ///
    /// Inferred from the host when unset.
    pub use_path_style_uris: Option<bool>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("account_name", &self.account_name)
            .field("account_key", &self.account_key.as_ref().map(Redact::from))
            .field("endpoint", &self.endpoint)
            .field("use_path_style_uris", &self.use_path_style_uris)
            .finish()
    }
}

impl Config {
    /// Load config from env.
    ///
    /// Fields that are already set are kept.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if self.account_name.is_none() {
            self.account_name = ctx
                .env_var(AZURE_STORAGE_ACCOUNT)
                .or_else(|| ctx.env_var(AZURE_STORAGE_ACCOUNT_NAME));
        }
        if self.account_key.is_none() {
            self.account_key = ctx
                .env_var(AZURE_STORAGE_ACCESS_KEY)
                .or_else(|| ctx.env_var(AZURE_STORAGE_ACCOUNT_KEY));
        }

        self
    }

    /// Config of the local storage emulator.
    pub fn development() -> Self {
        Self {
            account_name: Some(DEVSTORE_ACCOUNT.to_string()),
            account_key: Some(DEVSTORE_SECRET_KEY.to_string()),
            ..Default::default()
        }
    }

    /// Parse a connection string such as
    /// `DefaultEndpointsProtocol=https;AccountName=..;AccountKey=..`.
    pub fn try_from_connection_string(conn_str: &str) -> Result<Self> {
        connection_string::parse(conn_str)
    }

    /// Render the account as a connection string.
    pub fn to_connection_string(&self) -> String {
        connection_string::render(self)
    }

    /// Build the shared key credential of this account.
    pub fn credential(&self) -> Result<Credential> {
        match (&self.account_name, &self.account_key) {
            (Some(name), Some(key)) => Credential::with_shared_key(name, key),
            _ => Err(Error::config_invalid(
                "account_name and account_key are required",
            )),
        }
    }

    /// Whether this config points at the local storage emulator.
    pub fn is_development(&self) -> bool {
        self.account_name.as_deref() == Some(DEVSTORE_ACCOUNT)
    }

    /// Host of the given service.
    pub fn host(&self, service: Service) -> String {
        if let Some(endpoint) = &self.endpoint {
            return endpoint.clone();
        }
        if self.is_development() {
            service.development_host().to_string()
        } else {
            service.cloud_host().to_string()
        }
    }

    /// Whether requests to the given service address the account in the path.
    pub fn use_path_style_uris(&self, service: Service) -> bool {
        self.use_path_style_uris
            .unwrap_or_else(|| crate::is_path_style_host(&self.host(service)))
    }

    /// Base url of the given service.
    ///
    /// ```text
    /// path style:    http://127.0.0.1:10000/devstoreaccount1
    /// virtual host:  http://myaccount.blob.core.windows.net
    /// ```
    pub fn base_url(&self, service: Service) -> Result<String> {
        let account = self
            .account_name
            .as_deref()
            .ok_or_else(|| Error::config_invalid("account_name is required"))?;
        let host = self.host(service);

        if self.use_path_style_uris(service) {
            Ok(format!("http://{host}/{account}"))
        } else {
            Ok(format!("http://{account}.{host}"))
        }
    }
}
