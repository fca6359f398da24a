use std::{fs, path::Path, time::Duration};

use crate::error::TtsError;

/// Maximum input size accepted by the synthesis endpoint (bytes)
pub const MAX_SSML_BYTES: usize = 5000;

/// Narration for the Stat'master ad, with pauses and a slowed-down brand name.
pub const DEFAULT_SCRIPT: &str = r#"
<speak>
Here is Lisa, a French ninth-grader.
<break time="250ms"/>
Lisa takes her finals at the end of the year and she struggles with math,
<break time="1250ms"/>
especially statistics.
<break time="3250ms"/>
Her parents want to help but cannot find the right solution.
<break time="2650ms"/>

Suddenly, Lisa gets the best advice ever from Sophie.
<break time="1250ms"/>
<prosody rate="slow">Staaat'masssster.</prosody>
<break time="250ms"/>

Stat'master gives your child everything they need: clear lessons, training exercises, assessment exercises, and an AI tutor ready to answer questions so they are supported throughout learning.
<break time="250ms"/>

After each session, a summary is sent to parents so they can see their child's progress.
<break time="1250ms"/>

Lisa now finally feels ready for her finals.
<break time="1250ms"/>

Try the app at
</speak>
"#;

/// A checked SSML document, ready to be sent as synthesis input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsmlDocument(String);

impl SsmlDocument {
    pub fn parse(text: &str) -> Result<Self, TtsError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TtsError::InvalidSsml("document is empty".to_string()));
        }
        if !opens_speak(trimmed) {
            return Err(TtsError::InvalidSsml(
                "document must start with a <speak> element".to_string(),
            ));
        }
        if !trimmed.ends_with("</speak>") {
            return Err(TtsError::InvalidSsml(
                "document must end with </speak>".to_string(),
            ));
        }
        if trimmed.len() > MAX_SSML_BYTES {
            return Err(TtsError::InvalidSsml(format!(
                "document too long ({} bytes, max {})",
                trimmed.len(),
                MAX_SSML_BYTES
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TtsError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| TtsError::io(path, e))?;
        Self::parse(&text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Sum of every `<break time="..."/>` in the document.
    pub fn total_pause(&self) -> Duration {
        let mut total = Duration::ZERO;
        let mut rest = self.0.as_str();
        while let Some(start) = rest.find("<break") {
            let tag = &rest[start..];
            let end = tag.find('>').map(|i| i + 1).unwrap_or(tag.len());
            if let Some(d) = break_time(&tag[..end]) {
                total = total.saturating_add(d);
            }
            rest = &tag[end..];
        }
        total
    }
}

impl Default for SsmlDocument {
    fn default() -> Self {
        Self(DEFAULT_SCRIPT.trim().to_string())
    }
}

/// `<speak>` or `<speak ...attributes>`, but not `<speakers>`.
fn opens_speak(doc: &str) -> bool {
    doc.strip_prefix("<speak")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c == '>' || c.is_ascii_whitespace())
}

/// Extract the `time` attribute of a single break tag ("250ms", "1.5s").
fn break_time(tag: &str) -> Option<Duration> {
    let attr = tag.find("time=")?;
    let value = &tag[attr + 5..];
    let quote = value.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &value[1..];
    let value = &value[..value.find(quote)?];

    let (number, micros_per_unit) = if let Some(ms) = value.strip_suffix("ms") {
        (ms, 1_000.0)
    } else if let Some(s) = value.strip_suffix('s') {
        (s, 1_000_000.0)
    } else {
        return None;
    };
    let v = number.trim().parse::<f64>().ok()?;
    let micros = (v * micros_per_unit).round();
    if !micros.is_finite() || micros < 0.0 || micros > u64::MAX as f64 {
        return None;
    }
    Some(Duration::from_micros(micros as u64))
}
