//! Voiceover generation through the Google Cloud Text-to-Speech REST API.
//!
//! An SSML script is sent to `text:synthesize` with a fixed voice and audio
//! configuration, and the returned audio is written to a file.

pub mod audio;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod output;
pub mod ssml;

pub use audio::AudioEncoding;
pub use client::{TtsClient, Voice};
pub use config::SynthesisConfig;
pub use credentials::{Credentials, ServiceAccountKey};
pub use error::TtsError;
pub use output::{write_audio, AudioFile};
pub use ssml::SsmlDocument;

/// Synthesize `ssml` and save the audio to `config.output`.
///
/// The configuration is validated before any network traffic, and the file is
/// only written once the API has returned a non-empty buffer.
pub fn generate_voiceover(
    client: &TtsClient,
    ssml: &SsmlDocument,
    config: &SynthesisConfig,
) -> Result<AudioFile, TtsError> {
    config.validate()?;

    tracing::info!(
        "Generating audio with voice {} ({}, {}, rate {}, pitch {})",
        config.voice_name,
        config.language_code,
        config.audio_encoding,
        config.speaking_rate,
        config.pitch
    );
    let pause = ssml.total_pause();
    if !pause.is_zero() {
        tracing::debug!("Script contains {:.2}s of explicit pauses", pause.as_secs_f64());
    }

    let audio = client.synthesize(ssml, config)?;
    let file = write_audio(&config.output, &audio)?;

    tracing::info!("Wrote {} ({} bytes)", file.path.display(), file.bytes);
    Ok(file)
}
