//! Synthesis request/response handling.

mod request;
mod response;
mod stream;
mod types;

pub use request::{build_request, encode_query, FOLDER_ID_PARAM, SYNTHESIZE_URL};
pub use response::interpret;
pub use stream::AudioStream;
pub use types::{Speed, SynthesisOptions, MAX_SPEED, MIN_SPEED};
