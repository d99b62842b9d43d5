//! Synthesis option types.

use crate::{Error, ErrorContext, Result};
use std::fmt;

/// Slowest speech rate the service accepts.
pub const MIN_SPEED: f64 = 0.1;
/// Fastest speech rate the service accepts.
pub const MAX_SPEED: f64 = 3.0;

/// Speech rate multiplier in `[0.1, 3.0]`.
///
/// Options carry `Option<Speed>`; `None` leaves the rate to the service default.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Speed(f64);

impl Speed {
    pub fn new(value: f64) -> Result<Self> {
        if (MIN_SPEED..=MAX_SPEED).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::validation_with_context(
                "speed out of range",
                ErrorContext::new()
                    .with_field_path("options.speed")
                    .with_details(format!(
                        "expected {}..={}, got {}",
                        MIN_SPEED, MAX_SPEED, value
                    )),
            ))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Speed {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parameters of a single synthesis call.
///
/// String fields are sent as-is, including empty values. Empty text is accepted
/// here and rejected by the service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SynthesisOptions {
    pub text: String,
    /// Locale tag: `ru-RU`, `en-US`, ...
    pub language: String,
    /// Voice identifier: `omazh`, `zahar`, `jane`, ...
    pub voice: String,
    /// Emotion label: `good`, `neutral`, `evil`.
    pub emotion: String,
    pub speed: Option<Speed>,
}

impl SynthesisOptions {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    pub fn with_emotion(mut self, emotion: impl Into<String>) -> Self {
        self.emotion = emotion.into();
        self
    }

    pub fn with_speed(mut self, speed: Speed) -> Self {
        self.speed = Some(speed);
        self
    }
}
