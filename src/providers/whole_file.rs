//! The fallback provider: fixed `base` model, greedy decoding, no silence
//! filtering and no duration measurement.

use std::path::PathBuf;

use whisper_rs::SamplingStrategy;

use crate::config::{Config, ModelSize};
use crate::provider::{ProviderFactory, SpeechProvider, Transcript};
use crate::request::TranscriptionRequest;
use crate::{Error, Result, audio, segments};

pub struct WholeFileFactory;

impl ProviderFactory for WholeFileFactory {
    fn name(&self) -> &'static str {
        "whole-file"
    }

    fn probe(&self, config: &Config) -> Result<Box<dyn SpeechProvider>> {
        let model_path = config.model_path(ModelSize::Base).ok_or_else(|| {
            Error::unavailable(format!(
                "no base model found in {}",
                config.model_dir().display()
            ))
        })?;

        Ok(Box::new(WholeFileProvider { model_path }))
    }
}

pub struct WholeFileProvider {
    model_path: PathBuf,
}

impl SpeechProvider for WholeFileProvider {
    fn transcribe(&self, request: &TranscriptionRequest) -> Result<Transcript> {
        let samples = audio::decode_file(request.audio_path())?;

        let ctx = super::engine::load_context(&self.model_path)?;

        let params = super::engine::build_full_params(
            SamplingStrategy::Greedy { best_of: 1 },
            request.effective_language(),
        );

        let state = super::engine::run_full(&ctx, params, &samples)?;

        let segments = segments::collect_segments(&state)?;
        let text = segments::concat_trimmed(&segments);
        let language = super::engine::detected_language(&state);

        Ok(Transcript {
            text,
            language,
            duration_seconds: None,
        })
    }
}
