use super::{Transport, TransportError, TransportResponse};
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use reqwest::Proxy;
use std::env;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::build(reqwest::Client::builder().timeout(timeout))
    }

    /// Build with env-overridable defaults:
    /// - `SPEECHKIT_HTTP_TIMEOUT_SECS` (default 30)
    /// - `SPEECHKIT_PROXY_URL` (optional, all schemes)
    pub fn from_env() -> Result<Self> {
        let timeout_secs = env::var("SPEECHKIT_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let mut builder = reqwest::Client::builder().timeout(Duration::from_secs(timeout_secs));

        if let Ok(proxy_url) = env::var("SPEECHKIT_PROXY_URL") {
            match Proxy::all(&proxy_url) {
                Ok(proxy) => builder = builder.proxy(proxy),
                Err(e) => tracing::warn!(proxy = %proxy_url, error = %e, "ignoring invalid proxy url"),
            }
        }

        Self::build(builder)
    }

    /// Wrap an already configured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn build(builder: reqwest::ClientBuilder) -> Result<Self> {
        let client = builder.build().map_err(|e| {
            Error::configuration_with_context(
                format!("Failed to create HTTP client: {}", e),
                ErrorContext::new().with_source("http_transport"),
            )
        })?;
        Ok(Self { client })
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::with_client(reqwest::Client::new())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(
        &self,
        request: reqwest::Request,
    ) -> std::result::Result<TransportResponse, TransportError> {
        let resp = self.client.execute(request).await?;
        Ok(resp.into())
    }
}

impl From<reqwest::Response> for TransportResponse {
    fn from(resp: reqwest::Response) -> Self {
        let status = resp.status();
        let body = resp
            .bytes_stream()
            .map_err(|e| Error::Body(TransportError::Http(e)));
        TransportResponse::new(status, Box::pin(body))
    }
}
