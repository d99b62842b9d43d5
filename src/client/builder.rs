use super::config::ClientConfig;
use super::core::SpeechKitClient;
use crate::synthesis::SYNTHESIZE_URL;
use crate::transport::{HttpTransport, Transport};
use crate::{Error, ErrorContext, Result};
use reqwest::header::HeaderValue;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Environment variable holding the IAM/API bearer token.
pub const TOKEN_ENV: &str = "YANDEX_TOKEN";
/// Environment variable holding the optional folder id.
pub const FOLDER_ID_ENV: &str = "YANDEX_FOLDER_ID";

/// Builder for [`SpeechKitClient`].
///
/// Only the credential is required. Without an explicit transport a
/// [`HttpTransport`] is created, honoring `timeout` when set and the
/// `SPEECHKIT_*` env defaults otherwise.
pub struct ClientBuilder {
    credential: String,
    folder_id: Option<String>,
    transport: Option<Arc<dyn Transport>>,
    timeout: Option<Duration>,
    endpoint: Option<String>,
}

impl ClientBuilder {
    pub fn new(credential: impl Into<String>) -> Self {
        Self {
            credential: credential.into(),
            folder_id: None,
            transport: None,
            timeout: None,
            endpoint: None,
        }
    }

    /// Start from `YANDEX_TOKEN` and `YANDEX_FOLDER_ID`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let credential = lookup(TOKEN_ENV).ok_or_else(|| {
            Error::configuration_with_context(
                "credential not set",
                ErrorContext::new()
                    .with_field_path(format!("env.{}", TOKEN_ENV))
                    .with_source("client_builder"),
            )
        })?;
        let mut builder = Self::new(credential);
        if let Some(folder_id) = lookup(FOLDER_ID_ENV) {
            builder = builder.folder_id(folder_id);
        }
        Ok(builder)
    }

    /// Scope requests to a folder. An empty id means no scope.
    pub fn folder_id(mut self, folder_id: impl Into<String>) -> Self {
        let folder_id = folder_id.into();
        self.folder_id = (!folder_id.is_empty()).then_some(folder_id);
        self
    }

    /// Use a custom transport instead of the default `reqwest` one.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Overall timeout for the default transport. Ignored with a custom transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the synthesis endpoint.
    ///
    /// This is primarily for testing with mock servers.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn build_config(self) -> Result<ClientConfig> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", self.credential))
            .map_err(|_| {
                Error::configuration_with_context(
                    "credential is not a valid header value",
                    ErrorContext::new()
                        .with_field_path("credential")
                        .with_source("client_builder"),
                )
            })?;
        authorization.set_sensitive(true);

        let endpoint = self.endpoint.as_deref().unwrap_or(SYNTHESIZE_URL);
        let endpoint = Url::parse(endpoint).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid endpoint: {}", e),
                ErrorContext::new()
                    .with_field_path("endpoint")
                    .with_details(endpoint)
                    .with_source("client_builder"),
            )
        })?;

        let transport: Arc<dyn Transport> = match (self.transport, self.timeout) {
            (Some(transport), _) => transport,
            (None, Some(timeout)) => Arc::new(HttpTransport::new(timeout)?),
            (None, None) => Arc::new(HttpTransport::from_env()?),
        };

        Ok(ClientConfig {
            authorization,
            folder_id: self.folder_id,
            endpoint,
            transport,
        })
    }

    pub fn build(self) -> Result<SpeechKitClient> {
        Ok(SpeechKitClient::from_config(self.build_config()?))
    }
}
