use super::builder::ClientBuilder;
use super::config::ClientConfig;
use crate::synthesis::{build_request, interpret, AudioStream, SynthesisOptions};
use crate::{Error, Result};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// SpeechKit synthesis client.
///
/// Cheap to clone; clones share one read-only [`ClientConfig`], so a single client
/// can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct SpeechKitClient {
    config: Arc<ClientConfig>,
}

impl SpeechKitClient {
    pub fn builder(credential: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(credential)
    }

    /// Client with the default transport and no folder scope.
    pub fn new(credential: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(credential).build()
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Synthesize speech for `options`.
    ///
    /// Returns the audio as soon as the service answers 200; the body is not read.
    /// If `cancel` fires first the request is dropped and [`Error::Cancelled`] is
    /// returned. The returned stream stays bound to `cancel`.
    pub async fn synthesize(
        &self,
        cancel: &CancellationToken,
        options: &SynthesisOptions,
    ) -> Result<AudioStream> {
        let request = build_request(&self.config, options);
        debug!(
            endpoint = %self.config.endpoint().path(),
            scoped = self.config.folder_id().is_some(),
            voice = %options.voice,
            text_chars = options.text.chars().count(),
            "sending synthesis request"
        );

        let call = async {
            let response = self.config.transport().execute(request).await?;
            interpret(response).await
        };

        let audio = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("synthesis cancelled before the service answered");
                return Err(Error::Cancelled);
            }
            result = call => result?,
        };

        Ok(audio.with_cancellation(cancel.clone()))
    }
}
