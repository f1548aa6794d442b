use std::fmt::{Debug, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;
use winazure_core::Result;

use crate::{ManagementClient, OperationStatus, RetryPolicy, WaitError};

/// Function used to sleep between two polls.
pub type SleepFn = Arc<dyn Fn(Duration) -> Pin<Box<dyn Future<Output = ()> + Send>> + Sync + Send>;

/// Waits for asynchronous management operations to finish.
///
/// The status is always queried first. While it reports `InProgress` the
/// poller sleeps for the next backoff delay and queries again.
#[derive(Clone)]
pub struct OperationPoller {
    client: ManagementClient,
    policy: RetryPolicy,
    sleep_fn: SleepFn,
    cancel: Option<CancellationToken>,
}

impl Debug for OperationPoller {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationPoller")
            .field("client", &self.client)
            .field("policy", &self.policy)
            .field("cancel", &self.cancel)
            .finish_non_exhaustive()
    }
}

impl OperationPoller {
    /// Create a poller sleeping with `tokio::time::sleep`.
    pub fn new(client: ManagementClient, policy: RetryPolicy) -> Self {
        Self {
            client,
            policy,
            sleep_fn: Arc::new(|d: Duration| -> Pin<Box<dyn Future<Output = ()> + Send>> {
                Box::pin(tokio::time::sleep(d))
            }),
            cancel: None,
        }
    }

    /// Replace the sleep function.
    pub fn with_sleep_fn(mut self, sleep_fn: SleepFn) -> Self {
        self.sleep_fn = sleep_fn;
        self
    }

    /// Stop waiting once the token is cancelled.
    pub fn with_cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Retry policy of this poller.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Query the operation status once.
    pub async fn poll_once(&self, operation_id: &str) -> Result<OperationStatus> {
        self.client.get_operation_status(operation_id).await
    }

    /// Block until the operation succeeds, fails, runs out of retries or is cancelled.
    pub async fn wait_for(&self, operation_id: &str) -> std::result::Result<(), WaitError> {
        let mut delays = self.policy.backoff();
        let mut attempts = 0;

        loop {
            let status = self
                .poll_once(operation_id)
                .await
                .map_err(WaitError::Transport)?;

            match status {
                OperationStatus::Succeeded => {
                    info!("operation {operation_id} succeeded after {attempts} retries");
                    return Ok(());
                }
                OperationStatus::Failed(failure) => {
                    warn!("operation {operation_id} failed: {failure}");
                    return Err(WaitError::OperationFailed {
                        operation_id: operation_id.to_string(),
                        failure,
                    });
                }
                OperationStatus::InProgress => {}
            }

            let delay = match delays.next() {
                Some(delay) if self.policy.max_retries().map_or(true, |max| attempts < max) => {
                    delay
                }
                _ => {
                    warn!("operation {operation_id} still in progress after {attempts} retries");
                    return Err(WaitError::RetryExhausted {
                        operation_id: operation_id.to_string(),
                        attempts,
                    });
                }
            };

            debug!("operation {operation_id} in progress, retry in {delay:?}");
            self.sleep(operation_id, delay).await?;
            attempts += 1;
        }
    }

    async fn sleep(&self, operation_id: &str, delay: Duration) -> std::result::Result<(), WaitError> {
        let cancelled = || WaitError::Cancelled {
            operation_id: operation_id.to_string(),
        };

        let Some(token) = &self.cancel else {
            (self.sleep_fn)(delay).await;
            return Ok(());
        };
        if token.is_cancelled() {
            return Err(cancelled());
        }

        tokio::select! {
            _ = token.cancelled() => Err(cancelled()),
            _ = (self.sleep_fn)(delay) => Ok(()),
        }
    }
}
