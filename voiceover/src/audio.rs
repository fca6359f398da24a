use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::TtsError;

/// Audio container/codec requested from the synthesis API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioEncoding {
    #[default]
    Mp3,
    Linear16,
    OggOpus,
    Mulaw,
    Alaw,
}

impl AudioEncoding {
    /// Name as spelled by the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioEncoding::Mp3 => "MP3",
            AudioEncoding::Linear16 => "LINEAR16",
            AudioEncoding::OggOpus => "OGG_OPUS",
            AudioEncoding::Mulaw => "MULAW",
            AudioEncoding::Alaw => "ALAW",
        }
    }

    /// File extension matching the returned bytes.
    pub fn extension(&self) -> &'static str {
        match self {
            AudioEncoding::Mp3 => "mp3",
            // LINEAR16 comes back with a WAV header
            AudioEncoding::Linear16 | AudioEncoding::Mulaw | AudioEncoding::Alaw => "wav",
            AudioEncoding::OggOpus => "ogg",
        }
    }
}

impl fmt::Display for AudioEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudioEncoding {
    type Err = TtsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MP3" => Ok(AudioEncoding::Mp3),
            "LINEAR16" | "WAV" => Ok(AudioEncoding::Linear16),
            "OGG_OPUS" | "OGG" => Ok(AudioEncoding::OggOpus),
            "MULAW" => Ok(AudioEncoding::Mulaw),
            "ALAW" => Ok(AudioEncoding::Alaw),
            other => Err(TtsError::InvalidConfig(format!(
                "Unknown audio encoding: {other}. Expected one of MP3, LINEAR16, OGG_OPUS, MULAW, ALAW"
            ))),
        }
    }
}
