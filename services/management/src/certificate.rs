use log::debug;
use reqwest::Identity;
use winazure_core::{Context, Error, Result};

/// Load the management certificate as a TLS client identity.
///
/// The file must hold the PEM encoded certificate and its private key.
pub async fn load_identity(ctx: &Context, path: &str) -> Result<Identity> {
    let pem = ctx
        .file_read(path)
        .await
        .map_err(|e| e.with_context("failed to load management certificate"))?;

    debug!("loaded management certificate from {path}");

    Identity::from_pem(&pem).map_err(|e| {
        Error::credential_invalid("management certificate is not a valid PEM identity")
            .with_source(e)
            .with_context(format!("path: {path}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use winazure_core::{ErrorKind, FileRead};

    #[derive(Debug)]
    struct GarbageFileRead;

    #[async_trait]
    impl FileRead for GarbageFileRead {
        async fn file_read(&self, _: &str) -> Result<Vec<u8>> {
            Ok(b"this is not a pem file".to_vec())
        }
    }

    #[tokio::test]
    async fn test_invalid_pem() {
        let ctx = Context::new().with_file_read(GarbageFileRead);

        let err = load_identity(&ctx, "/tmp/mgmt.pem")
            .await
            .expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = load_identity(&Context::new(), "/tmp/mgmt.pem")
            .await
            .expect_err("must fail");
        assert!(err
            .context()
            .iter()
            .any(|c| c == "failed to load management certificate"));
    }
}
