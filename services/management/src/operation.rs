use std::fmt::{Display, Formatter};

use quick_xml::de;
use serde::Deserialize;
use winazure_core::{Error, Result};

/// State of an asynchronous management operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationStatus {
    /// The operation is still running.
    InProgress,
    /// The operation finished successfully.
    Succeeded,
    /// The operation finished with an error.
    Failed(OperationFailure),
}

/// Error reported by a failed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationFailure {
    /// Error code, for example `ConflictError`.
    pub code: String,
    /// Human readable message.
    pub message: String,
    /// HTTP status the operation would have returned synchronously.
    pub http_status_code: Option<u16>,
}

impl Display for OperationFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.http_status_code {
            Some(status) => write!(f, "{} ({status}): {}", self.code, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

impl std::error::Error for OperationFailure {}

impl OperationStatus {
    /// Parse the body of a `Get Operation Status` response.
    ///
    /// ```xml
    /// <Operation xmlns="http://schemas.microsoft.com/windowsazure">
    ///   <ID>request-id</ID>
    ///   <Status>Failed</Status>
    ///   <HttpStatusCode>409</HttpStatusCode>
    ///   <Error>
    ///     <Code>ConflictError</Code>
    ///     <Message>The specified DNS name is already taken.</Message>
    ///   </Error>
    /// </Operation>
    /// ```
    pub fn parse(xml: &str) -> Result<Self> {
        let resp: OperationResponse = de::from_str(xml).map_err(|e| {
            Error::unexpected("failed to parse operation status").with_source(e)
        })?;

        match resp.status.trim() {
            "InProgress" => Ok(OperationStatus::InProgress),
            "Succeeded" => Ok(OperationStatus::Succeeded),
            "Failed" => {
                let http_status_code = parse_status_code(&resp.http_status_code)?;
                let error = resp.error.unwrap_or_default();
                Ok(OperationStatus::Failed(OperationFailure {
                    code: error.code,
                    message: error.message,
                    http_status_code,
                }))
            }
            v => Err(Error::unexpected("unknown operation status")
                .with_context(format!("status: {v}"))
                .with_context(format!("operation: {}", resp.id))),
        }
    }
}

fn parse_status_code(v: &str) -> Result<Option<u16>> {
    let v = v.trim();
    if v.is_empty() {
        return Ok(None);
    }
    v.parse().map(Some).map_err(|e| {
        Error::unexpected("invalid http status code in operation status")
            .with_source(e)
            .with_context(format!("value: {v}"))
    })
}

/// `<Error><Code/><Message/></Error>` body shared by operation status and
/// failed management responses.
#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub(crate) struct ServiceError {
    pub code: String,
    pub message: String,
}

impl ServiceError {
    pub(crate) fn parse(xml: &str) -> Result<Self> {
        de::from_str(xml)
            .map_err(|e| Error::unexpected("failed to parse service error").with_source(e))
    }
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct OperationResponse {
    #[serde(rename = "ID")]
    id: String,
    status: String,
    http_status_code: String,
    error: Option<ServiceError>,
}
