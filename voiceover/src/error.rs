use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while preparing, requesting or saving a synthesis.
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Invalid SSML: {0}")]
    InvalidSsml(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No Google Cloud credentials available (set GOOGLE_APPLICATION_CREDENTIALS or GOOGLE_API_KEY)")]
    MissingCredentials,

    #[error("Failed to load credentials from {path}: {reason}")]
    Credentials { path: PathBuf, reason: String },

    #[error("Token exchange failed: {0}")]
    Token(String),

    #[error("Text-to-Speech API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Could not decode audio content: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("API returned an empty audio buffer")]
    EmptyAudio,

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TtsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TtsError::Io {
            path: path.into(),
            source,
        }
    }
}
