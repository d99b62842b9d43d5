//! Request building: options → query string, credential → header.

use super::types::SynthesisOptions;
use crate::client::ClientConfig;
use reqwest::header::AUTHORIZATION;
use reqwest::Method;
use std::borrow::Cow;

/// SpeechKit v1 synthesis endpoint.
pub const SYNTHESIZE_URL: &str = "https://tts.api.cloud.yandex.net/speech/v1/tts:synthesize";

/// Query parameter carrying the folder scope.
pub const FOLDER_ID_PARAM: &str = "folderId";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Text,
    Language,
    Voice,
    Emotion,
    Speed,
}

/// Option field to query parameter mapping, in encoding order.
const QUERY_FIELDS: [(Field, &str); 5] = [
    (Field::Text, "text"),
    (Field::Language, "lang"),
    (Field::Voice, "voice"),
    (Field::Emotion, "emotion"),
    (Field::Speed, "speed"),
];

impl Field {
    fn value(self, options: &SynthesisOptions) -> Option<Cow<'_, str>> {
        match self {
            Field::Text => Some(Cow::Borrowed(&options.text)),
            Field::Language => Some(Cow::Borrowed(&options.language)),
            Field::Voice => Some(Cow::Borrowed(&options.voice)),
            Field::Emotion => Some(Cow::Borrowed(&options.emotion)),
            Field::Speed => options.speed.map(|s| Cow::Owned(s.to_string())),
        }
    }
}

/// Encode options as `(param, value)` pairs. Unset speed is omitted.
pub fn encode_query(options: &SynthesisOptions) -> Vec<(&'static str, Cow<'_, str>)> {
    QUERY_FIELDS
        .iter()
        .filter_map(|&(field, name)| field.value(options).map(|v| (name, v)))
        .collect()
}

/// Build the outbound POST. No I/O happens here.
pub fn build_request(config: &ClientConfig, options: &SynthesisOptions) -> reqwest::Request {
    let mut url = config.endpoint().clone();
    {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in encode_query(options) {
            pairs.append_pair(name, &value);
        }
        if let Some(folder_id) = config.folder_id() {
            pairs.append_pair(FOLDER_ID_PARAM, folder_id);
        }
    }

    let mut request = reqwest::Request::new(Method::POST, url);
    request
        .headers_mut()
        .insert(AUTHORIZATION, config.authorization().clone());
    request
}
