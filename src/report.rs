//! The adapter's single-line JSON result.
//!
//! Every run that reaches the adapter produces exactly one
//! [`TranscriptionResult`] on stdout, success or not. The schema is closed:
//! `success` and `text` are always present, the rest appear only when they
//! carry a value.

use serde::Serialize;

use crate::Result;

/// The outcome of one transcription run.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptionResult {
    pub success: bool,

    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TranscriptionResult {
    /// A successful transcription.
    pub fn success(text: String, language: Option<String>, duration: Option<f64>) -> Self {
        Self {
            success: true,
            text,
            language,
            duration,
            error: None,
        }
    }

    /// A failed run. `text` stays present (and empty) so consumers can read
    /// it unconditionally.
    pub fn failure(error: String) -> Self {
        Self {
            success: false,
            text: String::new(),
            language: None,
            duration: None,
            error: Some(error),
        }
    }

    /// Serialize to the one-line wire form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_omits_error() {
        let result = TranscriptionResult::success(
            "hello world".into(),
            Some("en".into()),
            Some(2.5),
        );

        let json = result.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"success":true,"text":"hello world","language":"en","duration":2.5}"#
        );
    }

    #[test]
    fn success_without_duration_omits_the_key() {
        let result = TranscriptionResult::success("hi".into(), Some("en".into()), None);

        let json = result.to_json().unwrap();
        assert_eq!(json, r#"{"success":true,"text":"hi","language":"en"}"#);
    }

    #[test]
    fn failure_keeps_text_present_and_empty() {
        let result = TranscriptionResult::failure("Whisper not available: boom".into());

        let json = result.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"success":false,"text":"","error":"Whisper not available: boom"}"#
        );
    }

    #[test]
    fn output_is_one_line() {
        let result = TranscriptionResult::success("a\nb".into(), None, None);

        let json = result.to_json().unwrap();
        assert!(!json.contains('\n'));
    }
}
