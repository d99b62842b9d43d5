use crate::transport::TransportError;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Structured error context for configuration and validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Option or setting that caused the error (e.g., "options.speed", "env.YANDEX_TOKEN")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., accepted range, offending value)
    pub details: Option<String>,
    /// Component that raised the error (e.g., "client_builder", "http_transport")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Error reported by the synthesis service in its JSON error envelope.
///
/// Renders as `"<code>: <message>"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SynthesisError {
    #[serde(rename = "error_code", default)]
    pub code: String,
    #[serde(rename = "error_message", default)]
    pub message: String,
}

impl SynthesisError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SynthesisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for SynthesisError {}

/// Unified error type for the client.
#[derive(Debug, Error)]
pub enum Error {
    /// The transport could not deliver the request.
    #[error("failed to send request: {0}")]
    Transport(#[from] TransportError),

    /// The service answered but its body could not be read to the end.
    #[error("failed to read response body: {0}")]
    Body(TransportError),

    /// Non-OK status with a decodable error envelope.
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    /// Non-OK status without a usable error envelope.
    #[error("unexpected code {status}")]
    UnexpectedStatus { status: u16 },

    /// The caller's cancellation token fired before the call finished.
    #[error("request cancelled")]
    Cancelled,

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Create a new validation error with structured context
    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } | Error::Validation { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }

    /// HTTP status of a failed synthesis, when the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::UnexpectedStatus { status } => Some(*status),
            Error::Transport(TransportError::Http(e)) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the error came from the caller's cancellation token.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}
