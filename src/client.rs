//! HTTP client for submitting queries to a GraphQL endpoint.
//!
//! One POST per query. The response status is not inspected: whatever body
//! the server returns is decoded as a [`QueryEnvelope`].

use crate::protocol::{QueryEnvelope, QueryRequest};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur in the client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("failed to serialize request: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to send request: {0}")]
    Request(#[source] reqwest::Error),

    #[error("failed to read response body: {0}")]
    Receive(#[source] reqwest::Error),

    #[error("failed to deserialize response: {0}")]
    Deserialize(#[source] serde_json::Error),
}

/// Client bound to a single GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct Client {
    endpoint: String,
    http: reqwest::Client,
}

impl Client {
    /// Create a client for `endpoint`. Requests never time out unless
    /// `timeout` is given.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder =
            reqwest::Client::builder().user_agent(concat!("graphfuzz/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            endpoint: endpoint.into(),
            http: builder.build().map_err(ClientError::Build)?,
        })
    }

    /// Send `query` and decode the response envelope.
    pub async fn send(&self, query: &str) -> Result<QueryEnvelope, ClientError> {
        let body =
            serde_json::to_vec(&QueryRequest::new(query)).map_err(ClientError::Serialize)?;

        let response = self
            .http
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(ClientError::Request)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(ClientError::Receive)?;
        debug!("{} returned {} ({} bytes)", self.endpoint, status, bytes.len());

        serde_json::from_slice(&bytes).map_err(ClientError::Deserialize)
    }

    /// Get the endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
