//! Silence filtering ahead of inference.
//!
//! The buffer keeps its original length so the reported duration still
//! reflects the source audio; non-speech regions are muted in place rather
//! than cut out.

use std::path::Path;

use anyhow::{Context, anyhow};
use whisper_rs::{WhisperVadContext, WhisperVadContextParams, WhisperVadParams, WhisperVadSegments};

use crate::Result;
use crate::logging;

/// VAD confidence threshold (higher = more conservative).
const THRESHOLD: f32 = 0.5;
/// Padding kept around each detected speech segment.
const PAD_MS: u32 = 250;
/// Speech segments shorter than this are treated as noise.
const MIN_SPEECH_MS: u32 = 250;
/// Segments separated by less than this gap are merged.
const GAP_MERGE_MS: u32 = 300;
/// Cap on a single speech segment, in seconds.
const MAX_SPEECH_SECONDS: f32 = 15.0;

/// Mute everything the VAD model considers non-speech.
///
/// Returns `true` when at least one speech segment survived filtering, and
/// `false` when the buffer contains no usable speech at all (callers can
/// then skip inference entirely).
pub fn mute_non_speech(
    vad_model_path: &Path,
    sample_rate_hz: u32,
    samples: &mut [f32],
) -> Result<bool> {
    logging::silence_whisper_logs();

    let path = vad_model_path
        .to_str()
        .ok_or_else(|| anyhow!("VAD model path is not valid UTF-8"))?;

    let mut ctx = WhisperVadContext::new(path, WhisperVadContextParams::default())
        .with_context(|| format!("failed to load VAD model from {path}"))?;

    let mut vad_params = WhisperVadParams::default();
    vad_params.set_threshold(THRESHOLD);
    vad_params.set_min_speech_duration(MIN_SPEECH_MS as i32);
    vad_params.set_max_speech_duration(MAX_SPEECH_SECONDS);

    let segments = ctx
        .segments_from_samples(vad_params, samples)
        .context("VAD segmentation failed")?;

    let ranges = speech_sample_ranges(&segments, sample_rate_hz, samples.len())?;
    if ranges.is_empty() {
        return Ok(false);
    }

    mute_outside(samples, &ranges);
    Ok(true)
}

/// Convert VAD segments into sorted, non-overlapping sample index ranges,
/// padded and merged per the module's constants.
fn speech_sample_ranges(
    segments: &WhisperVadSegments,
    sample_rate_hz: u32,
    samples_len: usize,
) -> Result<Vec<(usize, usize)>> {
    let n = segments.num_segments();
    let sample_rate = sample_rate_hz as f32;

    let pad_samples = ms_to_samples(PAD_MS, sample_rate);
    let min_speech_samples = ms_to_samples(MIN_SPEECH_MS, sample_rate);
    let gap_merge_samples = ms_to_samples(GAP_MERGE_MS, sample_rate);

    let mut ranges: Vec<(usize, usize)> = Vec::new();

    for i in 0..n {
        let (mut start_idx, mut end_idx) =
            segment_sample_indexes(segments, i, sample_rate, samples_len)?;

        if end_idx.saturating_sub(start_idx) < min_speech_samples {
            continue;
        }

        start_idx = start_idx.saturating_sub(pad_samples);
        end_idx = (end_idx + pad_samples).min(samples_len);

        if start_idx >= end_idx {
            continue;
        }

        // Merge with the previous range when overlapping or nearly adjacent,
        // so `ranges` stays sorted and non-overlapping.
        if let Some((_, prev_end)) = ranges.last_mut() {
            let gap = start_idx.saturating_sub(*prev_end);
            if start_idx <= *prev_end || gap <= gap_merge_samples {
                *prev_end = (*prev_end).max(end_idx);
                continue;
            }
        }

        ranges.push((start_idx, end_idx));
    }

    Ok(ranges)
}

/// Zero all samples outside the given ranges. `ranges` must be sorted and
/// non-overlapping.
fn mute_outside(samples: &mut [f32], ranges: &[(usize, usize)]) {
    let mut cursor = 0usize;

    for &(start, end) in ranges {
        let start = start.min(samples.len());
        let end = end.min(samples.len());

        if start > cursor {
            samples[cursor..start].fill(0.0);
        }

        cursor = cursor.max(end);
    }

    if cursor < samples.len() {
        samples[cursor..].fill(0.0);
    }
}

fn ms_to_samples(ms: u32, sample_rate: f32) -> usize {
    ((ms as f32 / 1000.0) * sample_rate).round() as usize
}

/// Convert the i'th VAD segment into `(start_idx, end_idx)` sample indices.
///
/// Timestamps arrive in centiseconds. The start index is floored and the end
/// index ceiled so boundary samples stay inside the range; both are clamped
/// into `[0, samples_len]`.
fn segment_sample_indexes(
    segments: &WhisperVadSegments,
    i: i32,
    sample_rate: f32,
    samples_len: usize,
) -> Result<(usize, usize)> {
    let start_cs = segments
        .get_segment_start_timestamp(i)
        .ok_or_else(|| anyhow!("missing start timestamp for VAD segment {i}"))?;

    let end_cs = segments
        .get_segment_end_timestamp(i)
        .ok_or_else(|| anyhow!("missing end timestamp for VAD segment {i}"))?;

    let mut start_idx = (start_cs / 100.0 * sample_rate).floor() as usize;
    let mut end_idx = (end_cs / 100.0 * sample_rate).ceil() as usize;

    start_idx = start_idx.min(samples_len);
    end_idx = end_idx.min(samples_len);

    if end_idx < start_idx {
        end_idx = start_idx;
    }

    Ok((start_idx, end_idx))
}
