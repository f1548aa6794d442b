use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method, Request, Response, StatusCode};
use winazure_core::{Context, Error, HttpSend, Result};
use winazure_management::{Config, ManagementClient, SleepFn};

pub const SUBSCRIPTION_ID: &str = "sub-id";
pub const ENDPOINT: &str = "https://management.example.com";

/// Canned reply of [`ScriptedHttpSend`].
#[derive(Debug, Clone)]
pub enum Reply {
    Response {
        status: StatusCode,
        headers: Vec<(&'static str, String)>,
        body: String,
    },
    ConnectionReset,
}

impl Reply {
    pub fn ok(body: impl Into<String>) -> Self {
        Reply::Response {
            status: StatusCode::OK,
            headers: vec![],
            body: body.into(),
        }
    }

    pub fn accepted(request_id: &str) -> Self {
        Reply::Response {
            status: StatusCode::ACCEPTED,
            headers: vec![("x-ms-request-id", request_id.to_string())],
            body: String::new(),
        }
    }

    pub fn status(status: StatusCode, body: impl Into<String>) -> Self {
        Reply::Response {
            status,
            headers: vec![],
            body: body.into(),
        }
    }

    pub fn operation(status: &str) -> Self {
        Reply::ok(format!(
            r#"<Operation xmlns="http://schemas.microsoft.com/windowsazure"><ID>op-1</ID><Status>{status}</Status><HttpStatusCode>200</HttpStatusCode></Operation>"#
        ))
    }

    pub fn failed_operation(code: &str, message: &str, http_status: u16) -> Self {
        Reply::ok(format!(
            r#"<Operation xmlns="http://schemas.microsoft.com/windowsazure"><ID>op-1</ID><Status>Failed</Status><HttpStatusCode>{http_status}</HttpStatusCode><Error><Code>{code}</Code><Message>{message}</Message></Error></Operation>"#
        ))
    }
}

/// Request observed by [`ScriptedHttpSend`].
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub uri: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// HttpSend replaying scripted replies in order and recording every request.
#[derive(Debug, Clone, Default)]
pub struct ScriptedHttpSend {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl ScriptedHttpSend {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().collect())),
            requests: Arc::default(),
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl HttpSend for ScriptedHttpSend {
    async fn http_send(&self, req: Request<Bytes>) -> Result<Response<Bytes>> {
        let (parts, body) = req.into_parts();
        self.requests.lock().expect("lock poisoned").push(Recorded {
            method: parts.method,
            uri: parts.uri.to_string(),
            headers: parts.headers,
            body,
        });

        let reply = self
            .replies
            .lock()
            .expect("lock poisoned")
            .pop_front()
            .expect("no scripted reply left");

        match reply {
            Reply::Response {
                status,
                headers,
                body,
            } => {
                let mut resp = Response::builder().status(status);
                for (k, v) in headers {
                    resp = resp.header(k, v);
                }
                Ok(resp.body(Bytes::from(body)).expect("response must build"))
            }
            Reply::ConnectionReset => Err(Error::unexpected("connection reset by peer")
                .set_retryable(true)),
        }
    }
}

pub fn client(http: &ScriptedHttpSend) -> ManagementClient {
    let _ = env_logger::builder().is_test(true).try_init();

    let ctx = Context::new().with_http_send(http.clone());
    let config = Config::new(SUBSCRIPTION_ID, "/unused.pem").with_endpoint(ENDPOINT);
    ManagementClient::new(ctx, config).expect("client must build")
}

/// Sleep function that returns at once and records the requested delays.
pub fn recording_sleep() -> (SleepFn, Arc<Mutex<Vec<Duration>>>) {
    let delays = Arc::new(Mutex::new(Vec::new()));
    let recorded = delays.clone();
    let sleep_fn: SleepFn = Arc::new(
        move |d: Duration| -> Pin<Box<dyn Future<Output = ()> + Send>> {
            recorded.lock().expect("lock poisoned").push(d);
            Box::pin(async {})
        },
    );
    (sleep_fn, delays)
}
