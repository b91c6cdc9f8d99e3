use thiserror::Error;

/// Failure to load the site configuration blob.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be {expected}, got {value}")]
    OutOfRange {
        field: &'static str,
        expected: &'static str,
        value: f64,
    },
}

/// Why a play command did not take effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The platform refused to start playback without a user gesture.
    #[error("autoplay blocked by browser policy")]
    Policy,
    /// Playback was interrupted by a later `pause()` or source change.
    #[error("play request aborted")]
    Aborted,
    /// Anything else: decode failures, unsupported sources, network errors.
    #[error("media failure: {0}")]
    Media(String),
}

impl PlaybackError {
    /// Classify a rejected `play()` promise by its `DOMException` name.
    pub fn from_dom_name(name: &str, message: &str) -> Self {
        match name {
            "NotAllowedError" => PlaybackError::Policy,
            "AbortError" => PlaybackError::Aborted,
            _ if message.is_empty() => PlaybackError::Media(name.to_string()),
            _ => PlaybackError::Media(format!("{name}: {message}")),
        }
    }

    /// Whether a user interaction can be expected to unblock playback.
    pub fn is_policy(&self) -> bool {
        matches!(self, PlaybackError::Policy)
    }
}
