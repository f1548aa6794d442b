//! Shared Key signing for Windows Azure storage services.
//!
//! Blob and Queue requests are signed in [`CanonicalizationMode::Storage`],
//! Table requests in [`CanonicalizationMode::Table`].
//!
//! # Example
//!
//! ```no_run
//! use winazure_core::{Context, OsEnv, Signer};
//! use winazure_storage::{Config, ConfigCredentialProvider, RequestSigner, Service};
//!
//! # async fn example() -> winazure_core::Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let config = Config::default().from_env(&ctx);
//! let base_url = config.base_url(Service::Blob)?;
//!
//! let signer = Signer::new(
//!     ctx,
//!     ConfigCredentialProvider::new(config),
//!     RequestSigner::new(Service::Blob.mode()),
//! );
//!
//! let mut parts = http::Request::get(format!("{base_url}/?comp=list"))
//!     .header("x-ms-version", "2009-09-19")
//!     .body(())?
//!     .into_parts()
//!     .0;
//! signer.sign(&mut parts).await?;
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::{DEVSTORE_ACCOUNT, DEVSTORE_SECRET_KEY, X_MS_DATE};

mod connection_string;

mod config;
pub use config::{Config, Service};

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::{is_path_style_host, CanonicalizationMode, RequestSigner};

mod provide_credential;
pub use provide_credential::*;
