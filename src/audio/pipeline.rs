//! Normalization of decoded PCM into mono 16 kHz `f32`.
//!
//! Decoded buffers arrive at whatever rate and channel count the source
//! uses. The pipeline downmixes to mono, resamples when the source rate
//! differs from the target, and accumulates the whole result. `finish()`
//! flushes the resampler tail and yields the final buffer.

use anyhow::{Context, anyhow, bail};
use rubato::{Resampler, SincFixedIn, WindowFunction};
use symphonia::core::audio::{AudioBufferRef, SampleBuffer};

use crate::Result;

/// The mono sample rate whisper.cpp expects (Hz).
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Source frames fed to rubato per `process()` call.
const RESAMPLE_BLOCK_FRAMES: usize = 2048;

/// Stateful converter from decoded Symphonia buffers to one contiguous mono
/// 16 kHz `f32` buffer.
pub struct MonoPipeline {
    // Scratch buffer for copying decoded PCM into interleaved f32.
    sample_buf_f32: Option<SampleBuffer<f32>>,

    // Lazily initialized; only needed when the source rate != 16 kHz.
    resampler: Option<SincFixedIn<f32>>,

    // Mono source samples waiting for a full rubato input block.
    pending_src: Vec<f32>,

    // The accumulated output.
    out: Vec<f32>,
}

impl Default for MonoPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl MonoPipeline {
    pub fn new() -> Self {
        Self {
            sample_buf_f32: None,
            resampler: None,
            pending_src: Vec::new(),
            out: Vec::new(),
        }
    }

    /// Push one decoded buffer through the pipeline.
    pub fn push_decoded(&mut self, decoded: &AudioBufferRef<'_>) -> Result<()> {
        let (interleaved, src_rate, channels) =
            decoded_to_interleaved_f32(decoded, &mut self.sample_buf_f32)?;

        let mono_src = downmix_to_mono(&interleaved, channels);

        // Fast path: already at the target rate.
        if src_rate == TARGET_SAMPLE_RATE {
            self.out.extend_from_slice(&mono_src);
            return Ok(());
        }

        self.ensure_resampler(src_rate)?;
        self.pending_src.extend_from_slice(&mono_src);
        self.drain_full_blocks()?;
        Ok(())
    }

    /// Flush any buffered resampler input and return the accumulated buffer.
    pub fn finish(mut self) -> Result<Vec<f32>> {
        if self.resampler.is_some() && !self.pending_src.is_empty() {
            // rubato expects exact block sizes; pad the tail with zeros.
            let rem = self.pending_src.len() % RESAMPLE_BLOCK_FRAMES;
            if rem != 0 {
                let padded = self.pending_src.len() + (RESAMPLE_BLOCK_FRAMES - rem);
                self.pending_src.resize(padded, 0.0);
            }

            self.drain_full_blocks()?;
        }

        Ok(self.out)
    }

    fn ensure_resampler(&mut self, src_rate: u32) -> Result<()> {
        if self.resampler.is_some() {
            return Ok(());
        }

        let rs = SincFixedIn::<f32>::new(
            TARGET_SAMPLE_RATE as f64 / src_rate as f64,
            2.0,
            rubato::SincInterpolationParameters {
                sinc_len: 256,
                f_cutoff: 0.95,
                interpolation: rubato::SincInterpolationType::Linear,
                oversampling_factor: 256,
                window: WindowFunction::BlackmanHarris2,
            },
            RESAMPLE_BLOCK_FRAMES,
            1, // mono
        )
        .map_err(|e| anyhow!(e))
        .context("failed to init resampler")?;

        self.resampler = Some(rs);
        Ok(())
    }

    fn drain_full_blocks(&mut self) -> Result<()> {
        let rs = self
            .resampler
            .as_mut()
            .ok_or_else(|| anyhow!("resampler not initialized"))?;
        let in_max = rs.input_frames_max();

        while self.pending_src.len() >= in_max {
            let block: Vec<f32> = self.pending_src.drain(..in_max).collect();

            let input = vec![block];
            let resampled = rs
                .process(&input, None)
                .map_err(|e| anyhow!(e))
                .context("resampler process failed")?;

            if resampled.len() != 1 {
                bail!("expected mono output from resampler");
            }

            self.out.extend_from_slice(&resampled[0]);
        }

        Ok(())
    }
}

fn decoded_to_interleaved_f32(
    decoded: &AudioBufferRef<'_>,
    sample_buf_f32: &mut Option<SampleBuffer<f32>>,
) -> Result<(Vec<f32>, u32, usize)> {
    ensure_sample_buffer(decoded, sample_buf_f32);

    let buf = sample_buf_f32
        .as_mut()
        .ok_or_else(|| anyhow!("sample buffer not initialized"))?;

    buf.copy_interleaved_ref(decoded.clone());

    let src_rate = decoded.spec().rate;
    let channels = decoded.spec().channels.count();
    if channels == 0 {
        bail!("decoded audio had zero channels");
    }

    Ok((buf.samples().to_vec(), src_rate, channels))
}

fn ensure_sample_buffer(
    decoded: &AudioBufferRef<'_>,
    sample_buf_f32: &mut Option<SampleBuffer<f32>>,
) {
    if sample_buf_f32.is_some() {
        return;
    }

    let spec = *decoded.spec();
    let duration = decoded.capacity() as u64;
    *sample_buf_f32 = Some(SampleBuffer::<f32>::new(duration, spec));
}

/// Downmix interleaved samples into mono with an equal-weight average.
fn downmix_to_mono(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels == 1 {
        return interleaved.to_vec();
    }

    let frames = interleaved.len() / channels;
    let mut mono = Vec::with_capacity(frames);

    for f in 0..frames {
        let base = f * channels;
        let mut acc = 0.0;
        for c in 0..channels {
            acc += interleaved[base + c];
        }
        mono.push(acc / channels as f32);
    }

    mono
}
