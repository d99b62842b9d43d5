use crate::transport::Transport;
use reqwest::header::HeaderValue;
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Read-only settings shared by every call made through a client.
///
/// Built by [`ClientBuilder`](super::ClientBuilder); holds no per-request state.
#[derive(Clone)]
pub struct ClientConfig {
    pub(crate) authorization: HeaderValue,
    pub(crate) folder_id: Option<String>,
    pub(crate) endpoint: Url,
    pub(crate) transport: Arc<dyn Transport>,
}

impl ClientConfig {
    /// Folder scope sent as `folderId`, if any.
    pub fn folder_id(&self) -> Option<&str> {
        self.folder_id.as_deref()
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Pre-built `Bearer` header value, marked sensitive.
    pub(crate) fn authorization(&self) -> &HeaderValue {
        &self.authorization
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("authorization", &"<redacted>")
            .field("folder_id", &self.folder_id)
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}
