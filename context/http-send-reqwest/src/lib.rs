//! Reqwest-based HTTP client implementation for winazure.
//!
//! The management endpoint authenticates with a client certificate, so the
//! certificate lives in the `reqwest::Client` handed to [`ReqwestHttpSend::new`].
//! A client is cheap to clone and owns its connection pool.

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use reqwest::{Client, Request};
use winazure_core::{Error, HttpSend, Result};

/// Reqwest-based implementation of the `HttpSend` trait.
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let uri = req.uri().to_string();
        let req = Request::try_from(req)
            .map_err(|e| Error::request_invalid("failed to convert request").with_source(e))?;
        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| {
                Error::unexpected("failed to send http request")
                    .with_source(e)
                    .with_context(format!("uri: {uri}"))
                    .set_retryable(true)
            })?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| {
                Error::unexpected("failed to read response body")
                    .with_source(e)
                    .set_retryable(true)
            })?;
        Ok(http::Response::from_parts(parts, bs))
    }
}
