//! Transport layer: executes an outbound synthesis request.
//!
//! The client only depends on the [`Transport`] trait, so the HTTP stack can be
//! swapped (custom `reqwest::Client`, proxies, in-memory fakes in tests).

mod http;

pub use http::HttpTransport;

use crate::BoxStream;
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use reqwest::StatusCode;
use std::fmt;

/// Executes a fully built request and returns the raw response.
///
/// Implementations must not buffer the body; it is handed back as a stream so the
/// caller decides how much to read.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(
        &self,
        request: reqwest::Request,
    ) -> std::result::Result<TransportResponse, TransportError>;
}

/// Status line and lazily read body of a transport response.
///
/// Body read failures are reported as [`Error::Body`](crate::Error::Body).
pub struct TransportResponse {
    status: StatusCode,
    body: BoxStream<'static, Bytes>,
}

impl TransportResponse {
    pub fn new(status: StatusCode, body: BoxStream<'static, Bytes>) -> Self {
        Self { status, body }
    }

    /// Response with a body that is already in memory.
    pub fn from_bytes(status: StatusCode, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        let chunks: Vec<crate::Result<Bytes>> = if body.is_empty() {
            Vec::new()
        } else {
            vec![Ok(body)]
        };
        Self::new(status, Box::pin(stream::iter(chunks)))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn into_body(self) -> BoxStream<'static, Bytes> {
        self.body
    }
}

impl fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
