//! Response interpretation: audio on 200, decoded error envelope otherwise.

use super::stream::AudioStream;
use crate::error::SynthesisError;
use crate::transport::TransportResponse;
use crate::{BoxStream, Error, Result};
use bytes::Bytes;
use futures::StreamExt;
use reqwest::StatusCode;
use tracing::{debug, info};

/// Classify a transport response.
///
/// The status is checked before the body is touched. On success the body is
/// returned unread; on failure it is drained, decoded and dropped.
pub async fn interpret(response: TransportResponse) -> Result<AudioStream> {
    let status = response.status();
    if status == StatusCode::OK {
        return Ok(AudioStream::new(response.into_body()));
    }

    let status = status.as_u16();
    let envelope = read_body(response.into_body())
        .await
        .and_then(|body| decode_envelope(&body));

    match envelope {
        Some(err) => {
            info!(http_status = status, code = %err.code, "synthesis rejected by service");
            Err(Error::Synthesis(err))
        }
        None => {
            info!(http_status = status, "synthesis failed without error envelope");
            Err(Error::UnexpectedStatus { status })
        }
    }
}

async fn read_body(mut body: BoxStream<'static, Bytes>) -> Option<Vec<u8>> {
    let mut buf = Vec::new();
    while let Some(chunk) = body.next().await {
        match chunk {
            Ok(chunk) => buf.extend_from_slice(&chunk),
            Err(e) => {
                debug!(error = %e, "failed to read error body");
                return None;
            }
        }
    }
    Some(buf)
}

fn decode_envelope(body: &[u8]) -> Option<SynthesisError> {
    // Only the first JSON value counts; trailing bytes are ignored.
    let envelope = serde_json::Deserializer::from_slice(body)
        .into_iter::<SynthesisError>()
        .next()?
        .ok()?;
    if envelope.code.is_empty() {
        None
    } else {
        Some(envelope)
    }
}
