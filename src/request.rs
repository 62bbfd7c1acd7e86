//! What the caller asks the adapter to do.

use std::path::{Path, PathBuf};

/// A single transcription job.
#[derive(Debug, Clone)]
pub struct TranscriptionRequest {
    audio_path: PathBuf,
    language: String,
}

impl TranscriptionRequest {
    /// Build a request for `audio_path`.
    ///
    /// `language` is an ISO 639-1 hint like `"en"`; empty means auto-detect.
    pub fn new(audio_path: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            audio_path: audio_path.into(),
            language: language.into(),
        }
    }

    pub fn audio_path(&self) -> &Path {
        &self.audio_path
    }

    /// The raw language hint as the caller supplied it.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The language to force, or `None` to let the model detect it.
    pub fn effective_language(&self) -> Option<&str> {
        if self.language.is_empty() {
            None
        } else {
            Some(&self.language)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_language_means_auto_detect() {
        let request = TranscriptionRequest::new("speech.wav", "");
        assert_eq!(request.effective_language(), None);
    }

    #[test]
    fn explicit_language_is_forced() {
        let request = TranscriptionRequest::new("speech.wav", "de");
        assert_eq!(request.effective_language(), Some("de"));
    }
}
