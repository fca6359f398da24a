use base64::{engine::general_purpose, Engine as _};
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};

use crate::{
    audio::AudioEncoding, config::SynthesisConfig, credentials::Credentials, error::TtsError,
    ssml::SsmlDocument,
};

pub const DEFAULT_ENDPOINT: &str = "https://texttospeech.googleapis.com";

/// Request body for `POST /v1/text:synthesize`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    audio_config: AudioConfig,
}

#[derive(Serialize)]
struct SynthesisInput<'a> {
    ssml: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: AudioEncoding,
    speaking_rate: f32,
    pitch: f32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    #[serde(default)]
    audio_content: String,
}

#[derive(Deserialize)]
struct VoicesResponse {
    #[serde(default)]
    voices: Vec<Voice>,
}

/// A voice offered by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voice {
    pub name: String,
    #[serde(default)]
    pub language_codes: Vec<String>,
    #[serde(default)]
    pub ssml_gender: Option<String>,
    #[serde(default)]
    pub natural_sample_rate_hertz: Option<u32>,
}

// Google wraps failures as {"error": {"code", "message", "status"}}
#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

pub struct TtsClient {
    http: Client,
    endpoint: String,
    credentials: Credentials,
}

impl TtsClient {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_endpoint(credentials, DEFAULT_ENDPOINT)
    }

    /// Point the client at another API root (regional endpoint, test server).
    pub fn with_endpoint(credentials: Credentials, endpoint: &str) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Synthesize the document and return the raw audio bytes.
    pub fn synthesize(
        &self,
        ssml: &SsmlDocument,
        config: &SynthesisConfig,
    ) -> Result<Vec<u8>, TtsError> {
        let url = format!("{}/v1/text:synthesize", self.endpoint);
        let body = SynthesizeRequest {
            input: SynthesisInput { ssml: ssml.as_str() },
            voice: VoiceSelection {
                language_code: &config.language_code,
                name: &config.voice_name,
            },
            audio_config: AudioConfig {
                audio_encoding: config.audio_encoding,
                speaking_rate: config.speaking_rate,
                pitch: config.pitch,
            },
        };

        tracing::debug!(
            "Synthesizing {} bytes of SSML with voice {}",
            ssml.as_str().len(),
            config.voice_name
        );

        let request = self.credentials.authorize(self.http.post(url).json(&body), &self.http)?;
        let response = check_status(request.send()?)?;
        let payload: SynthesizeResponse = response.json()?;

        let audio = general_purpose::STANDARD.decode(payload.audio_content.as_bytes())?;
        tracing::debug!("Received {} audio bytes", audio.len());
        Ok(audio)
    }

    /// List available voices, optionally restricted to one BCP-47 language code.
    pub fn list_voices(&self, language: Option<&str>) -> Result<Vec<Voice>, TtsError> {
        let url = format!("{}/v1/voices", self.endpoint);
        let mut request = self.http.get(url);
        if let Some(lang) = language {
            request = request.query(&[("languageCode", lang)]);
        }

        let request = self.credentials.authorize(request, &self.http)?;
        let response = check_status(request.send()?)?;
        let payload: VoicesResponse = response.json()?;
        Ok(payload.voices)
    }
}

/// Turn a non-2xx response into `TtsError::Api`, keeping the API's message when there is one.
fn check_status(response: Response) -> Result<Response, TtsError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&text)
        .map(|b| b.error.message)
        .unwrap_or(text);

    Err(TtsError::Api {
        status: status.as_u16(),
        message,
    })
}
