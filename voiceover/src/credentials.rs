//! Google Cloud credentials for the Text-to-Speech REST API.
//!
//! A service-account key file (the usual `GOOGLE_APPLICATION_CREDENTIALS`
//! setup) is exchanged for a short-lived OAuth access token by signing a
//! JWT assertion. A plain API key is accepted as a lighter alternative.

use std::{fs, path::Path};

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::blocking::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use crate::error::TtsError;

pub const CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
/// Lifetime requested for the signed assertion (seconds)
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// The fields of a service-account JSON key that the token exchange needs.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

// Keep the private key out of logs
impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl ServiceAccountKey {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TtsError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| TtsError::Credentials {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| TtsError::Credentials {
            path: path.to_path_buf(),
            reason: format!("not a service account key: {e}"),
        })
    }

    /// Sign the RS256 assertion sent to the token endpoint.
    pub fn signed_assertion(&self, now: i64) -> Result<String, TtsError> {
        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .map_err(|e| TtsError::Token(format!("invalid private key: {e}")))?;

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.private_key_id.clone();

        let claims = AssertionClaims {
            iss: &self.client_email,
            scope: CLOUD_PLATFORM_SCOPE,
            aud: &self.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };

        encode(&header, &claims, &key).map_err(|e| TtsError::Token(e.to_string()))
    }

    /// Exchange a freshly signed assertion for an access token.
    pub fn access_token(&self, http: &Client) -> Result<String, TtsError> {
        let assertion = self.signed_assertion(chrono::Utc::now().timestamp())?;

        let response = http
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(TtsError::Token(format!("{status}: {body}")));
        }

        let token: TokenResponse = response.json()?;
        tracing::debug!("Obtained access token for {}", self.client_email);
        Ok(token.access_token)
    }
}

#[derive(Debug, Clone)]
pub enum Credentials {
    ServiceAccount(ServiceAccountKey),
    ApiKey(String),
    Missing,
}

impl Credentials {
    /// Resolve credentials from the environment. A key file takes precedence over an API key.
    pub fn from_env() -> Result<Self, TtsError> {
        if let Some(path) = std::env::var_os(CREDENTIALS_ENV).filter(|p| !p.is_empty()) {
            return ServiceAccountKey::from_file(path).map(Credentials::ServiceAccount);
        }
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(Credentials::ApiKey(key.trim().to_string())),
            _ => Ok(Credentials::Missing),
        }
    }

    /// Whether the credentials file variable is set at all.
    pub fn credentials_env_set() -> bool {
        std::env::var_os(CREDENTIALS_ENV).is_some_and(|p| !p.is_empty())
    }

    /// Attach authentication to an outgoing API request.
    pub fn authorize(
        &self,
        request: RequestBuilder,
        http: &Client,
    ) -> Result<RequestBuilder, TtsError> {
        match self {
            Credentials::ServiceAccount(key) => Ok(request.bearer_auth(key.access_token(http)?)),
            Credentials::ApiKey(key) => Ok(request.query(&[("key", key)])),
            Credentials::Missing => Err(TtsError::MissingCredentials),
        }
    }
}
