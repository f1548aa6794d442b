use crate::OperationFailure;

/// Errors returned while waiting for an operation.
#[derive(Debug, thiserror::Error)]
pub enum WaitError {
    /// Querying the operation status failed. Never retried.
    #[error("failed to query operation status")]
    Transport(#[source] winazure_core::Error),
    /// The operation finished with an error.
    #[error("operation {operation_id} failed: {failure}")]
    OperationFailed {
        /// Id of the operation.
        operation_id: String,
        /// Error reported by the service.
        #[source]
        failure: OperationFailure,
    },
    /// The operation was still in progress after the last allowed retry.
    #[error("operation {operation_id} still in progress after {attempts} retries")]
    RetryExhausted {
        /// Id of the operation.
        operation_id: String,
        /// Number of sleeps performed.
        attempts: usize,
    },
    /// Waiting was cancelled.
    #[error("waiting for operation {operation_id} was cancelled")]
    Cancelled {
        /// Id of the operation.
        operation_id: String,
    },
}
