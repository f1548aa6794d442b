use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{Method, Response, StatusCode};
use log::debug;
use winazure_core::{Context, Error, Result};
use winazure_http_send_reqwest::ReqwestHttpSend;

use crate::certificate::load_identity;
use crate::constants::*;
use crate::operation::ServiceError;
use crate::{Config, OperationStatus};

/// Client of the certificate authenticated service management API.
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ManagementClient {
    ctx: Context,
    config: Config,
    base_url: String,
}

impl ManagementClient {
    /// Load the management certificate once and build a client that presents it.
    ///
    /// The returned client replaces the `HttpSend` of `ctx` with a reqwest
    /// client carrying the certificate identity.
    pub async fn connect(ctx: Context, config: Config) -> Result<Self> {
        let path = config.require_certificate_path()?;
        let identity = load_identity(&ctx, path).await?;

        let client = reqwest::Client::builder()
            .identity(identity)
            .build()
            .map_err(|e| Error::unexpected("failed to build http client").with_source(e))?;

        Self::new(ctx.with_http_send(ReqwestHttpSend::new(client)), config)
    }

    /// Create a client that sends through the `HttpSend` of `ctx` as is.
    pub fn new(ctx: Context, config: Config) -> Result<Self> {
        let base_url = format!(
            "{}/{}",
            config.endpoint.trim_end_matches('/'),
            config.require_subscription_id()?
        );

        Ok(Self {
            ctx,
            config,
            base_url,
        })
    }

    /// `<endpoint>/<subscription id>`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Config of this client.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send a request to `<base_url><path>`.
    ///
    /// Responses outside `2xx` are turned into errors carrying the service
    /// error code and message.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Bytes>,
    ) -> Result<Response<Bytes>> {
        let url = if path.is_empty() || path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        };

        let mut req = http::Request::builder()
            .method(method)
            .uri(&url)
            .header(X_MS_VERSION, &self.config.api_version);
        if body.is_some() {
            req = req.header(CONTENT_TYPE, CONTENT_TYPE_XML);
        }
        let req = req.body(body.unwrap_or_default())?;

        let resp = self.ctx.http_send(req).await?;
        debug!("management response: {} {url}", resp.status());

        if !resp.status().is_success() {
            return Err(parse_error_response(&url, resp));
        }
        Ok(resp)
    }

    /// Send a request that starts an asynchronous operation.
    ///
    /// Returns the operation id found in `x-ms-request-id`.
    pub async fn send_async(
        &self,
        method: Method,
        path: &str,
        body: Option<Bytes>,
    ) -> Result<String> {
        let resp = self.send(method, path, body).await?;

        if !matches!(resp.status(), StatusCode::ACCEPTED | StatusCode::OK) {
            return Err(Error::unexpected("unexpected status of asynchronous operation")
                .with_context(format!("status: {}", resp.status())));
        }

        let request_id = resp
            .headers()
            .get(X_MS_REQUEST_ID)
            .ok_or_else(|| Error::unexpected("response has no x-ms-request-id header"))?
            .to_str()?
            .to_string();
        debug!("asynchronous operation started: {request_id}");

        Ok(request_id)
    }

    /// Query the status of an asynchronous operation once.
    pub async fn get_operation_status(&self, operation_id: &str) -> Result<OperationStatus> {
        let resp = self
            .send(Method::GET, &format!("/operations/{operation_id}"), None)
            .await?;

        let body = String::from_utf8(resp.into_body().to_vec())?;
        OperationStatus::parse(&body).map_err(|e| e.with_context(format!("operation: {operation_id}")))
    }
}

fn parse_error_response(url: &str, resp: Response<Bytes>) -> Error {
    let status = resp.status();
    let body = String::from_utf8_lossy(resp.body());

    let err = match ServiceError::parse(&body) {
        Ok(se) if !se.code.is_empty() => {
            Error::unexpected(format!("{}: {}", se.code, se.message))
        }
        _ => Error::unexpected("management request failed").with_context(format!("body: {body}")),
    };

    err.with_context(format!("status: {status}"))
        .with_context(format!("url: {url}"))
        .set_retryable(status.is_server_error())
}
