//! Shared whisper.cpp plumbing used by both providers.

use std::path::Path;

use anyhow::Context;
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters, WhisperState};

use crate::Result;
use crate::logging;

/// Load a model into an initialized `WhisperContext`.
pub fn load_context(model_path: &Path) -> Result<WhisperContext> {
    logging::silence_whisper_logs();

    let path = model_path.to_string_lossy();

    let ctx = WhisperContext::new_with_params(&path, WhisperContextParameters::default())
        .with_context(|| format!("failed to load model from path: {path}"))?;

    Ok(ctx)
}

/// Build inference parameters with the settings both providers share: thread
/// count, forced language, and silenced native printing.
pub fn build_full_params(
    strategy: SamplingStrategy,
    language: Option<&str>,
) -> FullParams<'_, 'static> {
    let mut params = FullParams::new(strategy);

    params.set_n_threads(num_cpus::get() as i32);
    params.set_language(language);
    params.set_no_context(true);
    params.set_single_segment(false);

    params.set_print_progress(false);
    params.set_print_special(false);
    params.set_print_realtime(false);
    params.set_print_timestamps(false);

    params.set_token_timestamps(false);

    params
}

/// Run one full inference pass and return the completed state.
pub fn run_full(
    ctx: &WhisperContext,
    params: FullParams<'_, '_>,
    samples: &[f32],
) -> Result<WhisperState> {
    let mut state = ctx.create_state().context("failed to create whisper state")?;

    state
        .full(params, samples)
        .context("failed to run whisper inference")?;

    Ok(state)
}

/// The language whisper detected during the last pass, as an ISO 639-1 code.
pub fn detected_language(state: &WhisperState) -> Option<String> {
    let lang_id = state.full_lang_id_from_state().ok()?;
    whisper_rs::get_lang_str(lang_id).map(str::to_string)
}
