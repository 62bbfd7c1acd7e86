//! The high-level entry point: walk the provider chain and produce one
//! [`TranscriptionResult`].
//!
//! Fallback is deliberately narrow. A factory reporting "not installed"
//! advances the chain; once a factory hands out a provider, that provider's
//! outcome is final. Errors that arise anywhere past the first factory (or
//! when the whole chain is exhausted) are reported as
//! `Whisper not available: …`, while a primary provider failing mid-run
//! keeps its own message.

use crate::config::Config;
use crate::provider::{ProviderFactory, Transcript};
use crate::providers;
use crate::report::TranscriptionResult;
use crate::request::TranscriptionRequest;

/// Transcribe `request` with the default provider chain.
pub fn transcribe(request: &TranscriptionRequest, config: &Config) -> TranscriptionResult {
    run_chain(&providers::default_chain(), request, config)
}

/// Walk `factories` in order and produce the run's result.
pub fn run_chain(
    factories: &[Box<dyn ProviderFactory>],
    request: &TranscriptionRequest,
    config: &Config,
) -> TranscriptionResult {
    let mut last_unavailable = String::from("no speech providers configured");

    for (position, factory) in factories.iter().enumerate() {
        let fell_back = position > 0;

        match factory.probe(config) {
            Ok(provider) => {
                if fell_back {
                    tracing::info!(provider = factory.name(), "falling back");
                }

                return match provider.transcribe(request) {
                    Ok(transcript) => merge(transcript, request),
                    Err(err) => failure(err.to_string(), fell_back),
                };
            }

            Err(err) if err.is_unavailable() => {
                tracing::debug!(provider = factory.name(), reason = %err, "provider unavailable");
                last_unavailable = err.to_string();
            }

            Err(err) => return failure(err.to_string(), fell_back),
        }
    }

    failure(last_unavailable, true)
}

/// Combine what the provider produced with what the caller asked for.
///
/// The detected language wins; the caller's hint fills in when detection
/// produced nothing.
fn merge(transcript: Transcript, request: &TranscriptionRequest) -> TranscriptionResult {
    let language = transcript
        .language
        .or_else(|| request.effective_language().map(str::to_string));

    TranscriptionResult::success(transcript.text, language, transcript.duration_seconds)
}

fn failure(message: String, fell_back: bool) -> TranscriptionResult {
    if fell_back {
        TranscriptionResult::failure(format!("Whisper not available: {message}"))
    } else {
        TranscriptionResult::failure(message)
    }
}
