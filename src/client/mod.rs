//! Client construction and the synthesis call.

mod builder;
mod config;
mod core;

pub use builder::{ClientBuilder, FOLDER_ID_ENV, TOKEN_ENV};
pub use config::ClientConfig;
pub use self::core::SpeechKitClient;
