//! Audio payload handed to the caller.

use crate::{BoxStream, Error, Result};
use bytes::{Bytes, BytesMut};
use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::io::StreamReader;
use tokio_util::sync::CancellationToken;

/// Encoded audio (Ogg Opus by default), read lazily from the response body.
///
/// Dropping the stream releases the underlying connection, whether or not it was
/// read to the end.
pub struct AudioStream {
    inner: BoxStream<'static, Bytes>,
}

impl AudioStream {
    pub(crate) fn new(inner: BoxStream<'static, Bytes>) -> Self {
        Self { inner }
    }

    /// Tie the remaining body to `cancel`: once it fires the stream yields
    /// [`Error::Cancelled`] and then ends.
    pub(crate) fn with_cancellation(self, cancel: CancellationToken) -> Self {
        let guarded = stream::unfold(Some((self.inner, cancel)), |state| async move {
            let Some((mut body, cancel)) = state else {
                return None;
            };
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                item = body.next() => Some(item),
            };
            match next {
                None => Some((Err(Error::Cancelled), None)),
                Some(item) => item.map(|item| (item, Some((body, cancel)))),
            }
        });
        Self::new(Box::pin(guarded))
    }

    /// Adapt into a `tokio::io::AsyncRead`.
    pub fn into_reader(self) -> impl AsyncRead + Send + Unpin {
        StreamReader::new(self.map_err(|e| match e {
            Error::Io(e) => e,
            other => io::Error::new(io::ErrorKind::Other, other),
        }))
    }

    /// Copy the whole payload into `writer`, returning the number of bytes written.
    pub async fn copy_to<W>(mut self, writer: &mut W) -> Result<u64>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let mut written = 0u64;
        while let Some(chunk) = self.next().await {
            let chunk = chunk?;
            writer.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        Ok(written)
    }

    /// Read the whole payload into memory.
    pub async fn bytes(mut self) -> Result<Bytes> {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.freeze())
    }
}

impl Stream for AudioStream {
    type Item = Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl std::fmt::Debug for AudioStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioStream").finish_non_exhaustive()
    }
}
