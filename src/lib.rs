//! # speechkit
//!
//! Client for the Yandex SpeechKit v1 text-to-speech API.
//!
//! ## Overview
//!
//! A synthesis call encodes [`SynthesisOptions`] into the query string of a POST to
//! the fixed `tts:synthesize` endpoint, authenticates it with a bearer token and
//! optionally scopes it to a folder. A 200 response is returned as an
//! [`AudioStream`] that is read lazily; any other status becomes an [`Error`],
//! structured when the service sent its JSON error envelope.
//!
//! The HTTP stack sits behind the [`Transport`] trait. [`HttpTransport`] (reqwest)
//! is used by default; tests and embedders can inject their own.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use speechkit::{SpeechKitClient, Speed, SynthesisOptions};
//! use tokio::io::AsyncWriteExt;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> speechkit::Result<()> {
//!     let client = SpeechKitClient::builder("iam-token")
//!         .folder_id("b1g...")
//!         .build()?;
//!
//!     let options = SynthesisOptions::new("Привет, мир!")
//!         .with_language("ru-RU")
//!         .with_voice("omazh")
//!         .with_emotion("neutral")
//!         .with_speed(Speed::new(1.2)?);
//!
//!     let audio = client.synthesize(&CancellationToken::new(), &options).await?;
//!     let mut file = tokio::fs::File::create("hello.ogg").await?;
//!     audio.copy_to(&mut file).await?;
//!     file.flush().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client builder, shared config and the synthesis call |
//! | [`error`] | Error type, context and the service error envelope |
//! | [`synthesis`] | Option types, request building, response interpretation |
//! | [`transport`] | Pluggable HTTP execution |

pub mod client;
pub mod error;
pub mod synthesis;
pub mod transport;

pub use client::{ClientBuilder, ClientConfig, SpeechKitClient};
pub use error::{Error, ErrorContext, SynthesisError};
pub use synthesis::{AudioStream, Speed, SynthesisOptions};
pub use transport::{HttpTransport, Transport, TransportError, TransportResponse};

use futures::Stream;
use std::pin::Pin;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// A pinned, boxed stream that emits `Result<T>`
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;
