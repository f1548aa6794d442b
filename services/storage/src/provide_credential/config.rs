use async_trait::async_trait;
use winazure_core::{Context, ProvideCredential, Result};

use crate::credential::Credential;
use crate::Config;

/// Provides the shared key carried by a [`Config`].
///
/// Returns `None` when the config has no account name or key.
#[derive(Clone, Debug)]
pub struct ConfigCredentialProvider {
    config: Config,
}

impl ConfigCredentialProvider {
    /// Create a provider over the given config.
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        match (&self.config.account_name, &self.config.account_key) {
            (Some(name), Some(key)) => Ok(Some(Credential::with_shared_key(name, key)?)),
            _ => Ok(None),
        }
    }
}
