//! Client of the Windows Azure service management API.
//!
//! Requests are authenticated with a management certificate. Calls that start
//! an asynchronous operation return its id, which [`OperationPoller`] waits on.
//!
//! # Example
//!
//! ```no_run
//! use winazure_core::{Context, OsEnv};
//! use winazure_file_read_tokio::TokioFileRead;
//! use winazure_management::{Config, ManagementClient, OperationPoller, RetryPolicy};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let ctx = Context::new().with_file_read(TokioFileRead).with_env(OsEnv);
//! let config = Config::default().from_env(&ctx);
//! let client = ManagementClient::connect(ctx, config).await?;
//!
//! let operation_id = client
//!     .send_async(http::Method::DELETE, "/services/storageservices/myaccount", None)
//!     .await?;
//! OperationPoller::new(client, RetryPolicy::default())
//!     .wait_for(&operation_id)
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::{DEFAULT_API_VERSION, DEFAULT_ENDPOINT, X_MS_REQUEST_ID, X_MS_VERSION};

mod config;
pub use config::Config;

mod certificate;
pub use certificate::load_identity;

mod client;
pub use client::ManagementClient;

mod error;
pub use error::WaitError;

mod operation;
pub use operation::{OperationFailure, OperationStatus};

mod retry;
pub use retry::{Backoff, RetryPolicy};

mod poller;
pub use poller::{OperationPoller, SleepFn};
