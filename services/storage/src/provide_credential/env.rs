use async_trait::async_trait;
use log::debug;
use winazure_core::{Context, ProvideCredential, Result};

use crate::constants::*;
use crate::credential::Credential;
use crate::Config;

/// Loads a shared key from `AZURE_STORAGE_ACCOUNT` and `AZURE_STORAGE_ACCESS_KEY`.
///
/// `AZURE_STORAGE_ACCOUNT_NAME` and `AZURE_STORAGE_ACCOUNT_KEY` are accepted
/// as fallbacks, then `AZURE_STORAGE_CONNECTION_STRING`.
#[derive(Clone, Debug, Default)]
pub struct EnvCredentialProvider {}

impl EnvCredentialProvider {
    /// Create a new provider.
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let envs = ctx.env_vars();

        let account_name = envs
            .get(AZURE_STORAGE_ACCOUNT)
            .or_else(|| envs.get(AZURE_STORAGE_ACCOUNT_NAME));
        let account_key = envs
            .get(AZURE_STORAGE_ACCESS_KEY)
            .or_else(|| envs.get(AZURE_STORAGE_ACCOUNT_KEY));

        if let (Some(name), Some(key)) = (account_name, account_key) {
            return Ok(Some(Credential::with_shared_key(name, key)?));
        }

        if let Some(conn_str) = envs.get(AZURE_STORAGE_CONNECTION_STRING) {
            let config = Config::try_from_connection_string(conn_str)?;
            return Ok(Some(config.credential()?));
        }

        debug!("storage account name or key not found in env");
        Ok(None)
    }
}
