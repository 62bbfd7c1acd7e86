//! The primary provider: configured model size, VAD silence filtering,
//! beam search decoding.

use std::path::PathBuf;

use whisper_rs::SamplingStrategy;

use crate::config::Config;
use crate::provider::{ProviderFactory, SpeechProvider, Transcript};
use crate::request::TranscriptionRequest;
use crate::{Error, Result, audio, segments, vad};

pub struct VadFilteredFactory;

impl ProviderFactory for VadFilteredFactory {
    fn name(&self) -> &'static str {
        "vad-filtered"
    }

    fn probe(&self, config: &Config) -> Result<Box<dyn SpeechProvider>> {
        let size = config.model_size();

        let model_path = config.model_path(size).ok_or_else(|| {
            Error::unavailable(format!(
                "no {size} model found in {}",
                config.model_dir().display()
            ))
        })?;

        let vad_model_path = config.vad_model_path().ok_or_else(|| {
            Error::unavailable(format!(
                "no VAD model found in {}",
                config.model_dir().display()
            ))
        })?;

        Ok(Box::new(VadFilteredProvider {
            model_path,
            vad_model_path,
        }))
    }
}

pub struct VadFilteredProvider {
    model_path: PathBuf,
    vad_model_path: PathBuf,
}

impl SpeechProvider for VadFilteredProvider {
    fn transcribe(&self, request: &TranscriptionRequest) -> Result<Transcript> {
        let mut samples = audio::decode_file(request.audio_path())?;
        let duration = audio::duration_seconds(&samples);

        let has_speech =
            vad::mute_non_speech(&self.vad_model_path, audio::TARGET_SAMPLE_RATE, &mut samples)?;

        // Nothing to decode: report success with empty text but keep the
        // measured duration honest.
        if !has_speech {
            tracing::debug!(path = %request.audio_path().display(), "no speech detected");
            return Ok(Transcript {
                text: String::new(),
                language: None,
                duration_seconds: Some(duration),
            });
        }

        let ctx = super::engine::load_context(&self.model_path)?;

        let params = super::engine::build_full_params(
            SamplingStrategy::BeamSearch {
                beam_size: 5,
                patience: 1.0,
            },
            request.effective_language(),
        );

        let state = super::engine::run_full(&ctx, params, &samples)?;

        let segments = segments::collect_segments(&state)?;
        let text = segments::join_trimmed(&segments);
        let language = super::engine::detected_language(&state);

        Ok(Transcript {
            text,
            language,
            duration_seconds: Some(duration),
        })
    }
}
