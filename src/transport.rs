//! HTTP transport boundary for outbound notification writes.
//!
//! The dispatcher hands a fully-formed URL and JSON payload to a [`Transport`]
//! and gets back a status code plus body text, or a transport error.
//! Connection pooling, TLS trust, and timeouts belong to the transport's
//! owner, not to this crate.

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use thiserror::Error;

/// A transport-level failure: connection error, timeout, or similar.
#[derive(Error, Debug)]
#[error("transport request failed: {0}")]
pub struct TransportError(#[from] pub reqwest::Error);

/// Response surfaced from the transport: status code plus raw body text.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// A trait for transports that can issue idempotent JSON writes.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues one PUT of `payload` to `url` and returns the raw response.
    async fn put(&self, url: Url, payload: Value) -> Result<TransportResponse, TransportError>;
}

/// Default transport over a shared `reqwest::Client`.
///
/// The client is injected so callers keep control of pooling and timeouts;
/// it is cheap to clone and safe for concurrent use.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a new `HttpTransport` around an existing client.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn put(&self, url: Url, payload: Value) -> Result<TransportResponse, TransportError> {
        let response = self.client.put(url).json(&payload).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Ok(TransportResponse { status, body })
    }
}
