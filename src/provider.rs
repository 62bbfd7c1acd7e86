//! The seam between the adapter and concrete speech backends.
//!
//! Providers come in two stages:
//! - a [`ProviderFactory`] checks whether a backend's model artifacts are
//!   installed (cheaply, without loading anything) and hands out a provider
//! - a [`SpeechProvider`] runs one inference pass
//!
//! The split is what makes fallback precise: "not installed" is a factory
//! outcome ([`crate::Error::Unavailable`]) that sends the adapter to the next
//! factory in the chain, while a failure from an obtained provider is
//! terminal.

use crate::Result;
use crate::config::Config;
use crate::request::TranscriptionRequest;

/// What a provider produced for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    /// The assembled transcript text. May be empty when the audio contains
    /// no usable speech.
    pub text: String,

    /// The language the model detected, when it reports one.
    pub language: Option<String>,

    /// Source audio duration in seconds, when the provider measures it.
    pub duration_seconds: Option<f64>,
}

/// A backend able to run one transcription pass per call.
pub trait SpeechProvider {
    fn transcribe(&self, request: &TranscriptionRequest) -> Result<Transcript>;
}

/// Probes for an installed backend and constructs its provider.
pub trait ProviderFactory {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Check artifacts on disk and build the provider.
    ///
    /// Returns [`crate::Error::Unavailable`] when the backend's models are
    /// not installed. Any other error means the backend exists but is broken,
    /// which does not trigger fallback.
    fn probe(&self, config: &Config) -> Result<Box<dyn SpeechProvider>>;
}
