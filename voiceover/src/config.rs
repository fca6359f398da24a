// Synthesis parameters for the voiceover generator

use std::path::PathBuf;

use crate::{audio::AudioEncoding, error::TtsError};

pub const DEFAULT_VOICE: &str = "en-US-Neural2-D";
pub const DEFAULT_LANGUAGE: &str = "en-US";
/// Output file name without extension; the extension follows the encoding.
pub const DEFAULT_OUTPUT_STEM: &str = "voiceover_statmaster";

const MIN_SPEAKING_RATE: f32 = 0.25;
const MAX_SPEAKING_RATE: f32 = 4.0;
const MAX_PITCH: f32 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisConfig {
    pub voice_name: String,
    pub language_code: String,
    pub audio_encoding: AudioEncoding,
    pub speaking_rate: f32,
    pub pitch: f32,
    pub output: PathBuf,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            voice_name: DEFAULT_VOICE.to_string(),
            language_code: DEFAULT_LANGUAGE.to_string(),
            audio_encoding: AudioEncoding::Mp3,
            speaking_rate: 1.0,
            pitch: 0.0,
            output: default_output(AudioEncoding::Mp3),
        }
    }
}

/// Default output path for `encoding`, e.g. `voiceover_statmaster.ogg`.
pub fn default_output(encoding: AudioEncoding) -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_STEM).with_extension(encoding.extension())
}

impl SynthesisConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source; unparsable values keep the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let voice_name = non_empty("VOICEOVER_VOICE").unwrap_or(defaults.voice_name);

        let language_code = non_empty("VOICEOVER_LANGUAGE").unwrap_or(defaults.language_code);

        let audio_encoding = non_empty("VOICEOVER_ENCODING")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.audio_encoding);

        let speaking_rate = non_empty("VOICEOVER_SPEAKING_RATE")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.speaking_rate);

        let pitch = non_empty("VOICEOVER_PITCH")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.pitch);

        let output = non_empty("VOICEOVER_OUTPUT")
            .map(PathBuf::from)
            .unwrap_or_else(|| default_output(audio_encoding));

        Self {
            voice_name,
            language_code,
            audio_encoding,
            speaking_rate,
            pitch,
            output,
        }
    }

    /// Change the encoding, renaming the output too when it is still the default one.
    pub fn set_encoding(&mut self, encoding: AudioEncoding) {
        if self.output == default_output(self.audio_encoding) {
            self.output = default_output(encoding);
        }
        self.audio_encoding = encoding;
    }

    pub fn validate(&self) -> Result<(), TtsError> {
        if self.voice_name.trim().is_empty() {
            return Err(TtsError::InvalidConfig("Voice name cannot be empty".to_string()));
        }
        if self.language_code.trim().is_empty() {
            return Err(TtsError::InvalidConfig(
                "Language code cannot be empty".to_string(),
            ));
        }
        if !(MIN_SPEAKING_RATE..=MAX_SPEAKING_RATE).contains(&self.speaking_rate) {
            return Err(TtsError::InvalidConfig(format!(
                "Speaking rate {} out of range ({MIN_SPEAKING_RATE} to {MAX_SPEAKING_RATE})",
                self.speaking_rate
            )));
        }
        if !(-MAX_PITCH..=MAX_PITCH).contains(&self.pitch) {
            return Err(TtsError::InvalidConfig(format!(
                "Pitch {} out of range (-{MAX_PITCH} to {MAX_PITCH})",
                self.pitch
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_fixed_voiceover() {
        let cfg = SynthesisConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg, SynthesisConfig::default());
        assert_eq!(cfg.voice_name, "en-US-Neural2-D");
        assert_eq!(cfg.output, PathBuf::from("voiceover_statmaster.mp3"));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let cfg = SynthesisConfig::from_lookup(lookup(&[
            ("VOICEOVER_VOICE", "fr-FR-Neural2-A"),
            ("VOICEOVER_LANGUAGE", "fr-FR"),
            ("VOICEOVER_ENCODING", "ogg_opus"),
            ("VOICEOVER_SPEAKING_RATE", "1.25"),
            ("VOICEOVER_PITCH", "-2.5"),
            ("VOICEOVER_OUTPUT", "out/voix.ogg"),
        ]));
        assert_eq!(cfg.voice_name, "fr-FR-Neural2-A");
        assert_eq!(cfg.language_code, "fr-FR");
        assert_eq!(cfg.audio_encoding, AudioEncoding::OggOpus);
        assert_eq!(cfg.speaking_rate, 1.25);
        assert_eq!(cfg.pitch, -2.5);
        assert_eq!(cfg.output, PathBuf::from("out/voix.ogg"));
    }

    #[test]
    fn test_default_output_follows_encoding() {
        let cfg = SynthesisConfig::from_lookup(lookup(&[("VOICEOVER_ENCODING", "ogg")]));
        assert_eq!(cfg.output, PathBuf::from("voiceover_statmaster.ogg"));

        let cfg = SynthesisConfig::from_lookup(lookup(&[
            ("VOICEOVER_ENCODING", "LINEAR16"),
            ("VOICEOVER_OUTPUT", "promo.mp3"),
        ]));
        assert_eq!(cfg.output, PathBuf::from("promo.mp3"));
    }

    #[test]
    fn test_set_encoding_keeps_custom_output() {
        let mut cfg = SynthesisConfig::default();
        cfg.set_encoding(AudioEncoding::Linear16);
        assert_eq!(cfg.output, PathBuf::from("voiceover_statmaster.wav"));

        cfg.output = PathBuf::from("out/promo.bin");
        cfg.set_encoding(AudioEncoding::OggOpus);
        assert_eq!(cfg.output, PathBuf::from("out/promo.bin"));
        assert_eq!(cfg.audio_encoding, AudioEncoding::OggOpus);
    }

    #[test]
    fn test_unparsable_values_fall_back() {
        let cfg = SynthesisConfig::from_lookup(lookup(&[
            ("VOICEOVER_SPEAKING_RATE", "fast"),
            ("VOICEOVER_ENCODING", "flac"),
            ("VOICEOVER_VOICE", "  "),
        ]));
        assert_eq!(cfg, SynthesisConfig::default());
    }

    #[test]
    fn test_validate_ranges() {
        let mut cfg = SynthesisConfig::default();
        cfg.speaking_rate = 5.0;
        assert!(matches!(cfg.validate(), Err(TtsError::InvalidConfig(_))));

        let mut cfg = SynthesisConfig::default();
        cfg.pitch = -20.5;
        assert!(cfg.validate().is_err());

        let mut cfg = SynthesisConfig::default();
        cfg.voice_name = String::new();
        assert!(cfg.validate().is_err());
    }
}
