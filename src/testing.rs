//! In-process mock GraphQL endpoint for tests.
//!
//! Serves HTTP/1.1 with hyper on a loopback port, records every query it
//! receives and answers with a caller-supplied reply:
//!
//! ```ignore
//! let endpoint = MockEndpoint::start(|_query| MockReply::json(200, r#"{"data":null}"#)).await?;
//! let client = Client::new(endpoint.url(), None)?;
//!
//! client.send("{ User() { id } }").await?;
//! assert_eq!(endpoint.queries().await, ["{ User() { id } }"]);
//! ```

use crate::protocol::QueryRequest;
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

/// Errors from the mock endpoint.
#[derive(Debug, Error)]
pub enum TestError {
    #[error("failed to bind mock endpoint: {0}")]
    Bind(#[source] std::io::Error),
}

/// Canned HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockReply {
    pub status: u16,
    pub content_type: String,
    pub body: String,
}

impl MockReply {
    #[must_use]
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "application/json".into(),
            body: body.into(),
        }
    }

    #[must_use]
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "text/plain".into(),
            body: body.into(),
        }
    }
}

/// A request as seen by the mock endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub content_type: Option<String>,
    /// The decoded `query` member, or the raw body if it did not decode.
    pub query: String,
}

type Responder = dyn Fn(&str) -> MockReply + Send + Sync;

struct State {
    responder: Box<Responder>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Mock GraphQL endpoint that stops when dropped.
pub struct MockEndpoint {
    addr: SocketAddr,
    state: Arc<State>,
    server_handle: JoinHandle<()>,
}

impl MockEndpoint {
    /// Start serving on an ephemeral loopback port.
    pub async fn start<F>(responder: F) -> Result<Self, TestError>
    where
        F: Fn(&str) -> MockReply + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(TestError::Bind)?;
        let addr = listener.local_addr().map_err(TestError::Bind)?;

        let state = Arc::new(State {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        });

        let server_state = Arc::clone(&state);
        let server_handle = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let state = Arc::clone(&server_state);
                tokio::spawn(async move {
                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(req, &state).await }
                    });
                    if let Err(e) = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await
                    {
                        debug!("Mock connection error: {}", e);
                    }
                });
            }
        });

        Ok(Self {
            addr,
            state,
            server_handle,
        })
    }

    /// Start an endpoint that answers every query with the same reply.
    pub async fn with_reply(reply: MockReply) -> Result<Self, TestError> {
        Self::start(move |_| reply.clone()).await
    }

    /// URL to POST queries to.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}/graphql", self.addr)
    }

    /// Every request received so far, in arrival order.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().await.clone()
    }

    /// The queries received so far, in arrival order.
    pub async fn queries(&self) -> Vec<String> {
        self.state
            .requests
            .lock()
            .await
            .iter()
            .map(|r| r.query.clone())
            .collect()
    }
}

impl Drop for MockEndpoint {
    fn drop(&mut self) {
        self.server_handle.abort();
    }
}

async fn handle_request(
    req: Request<Incoming>,
    state: &State,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let method = req.method().to_string();
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let body = req.into_body().collect().await?.to_bytes();
    let query = serde_json::from_slice::<QueryRequest>(&body).map_or_else(
        |_| String::from_utf8_lossy(&body).into_owned(),
        |request| request.query,
    );

    let reply = (state.responder)(&query);
    state.requests.lock().await.push(RecordedRequest {
        method,
        content_type,
        query,
    });

    let mut response = Response::new(Full::new(Bytes::from(reply.body)));
    *response.status_mut() =
        StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if let Ok(value) = HeaderValue::from_str(&reply.content_type) {
        response.headers_mut().insert(CONTENT_TYPE, value);
    }
    Ok(response)
}
