//! Audio decoding into the shape whisper.cpp expects.
//!
//! The entry point is [`decode_file`]: any container/codec Symphonia can
//! open goes in, a contiguous mono 16 kHz `f32` buffer comes out.

mod decode;
mod demux;
mod pipeline;

use std::fs::File;
use std::path::Path;

use anyhow::Context;

pub use pipeline::TARGET_SAMPLE_RATE;

use crate::Result;

/// Decode `path` into mono `f32` samples at [`TARGET_SAMPLE_RATE`].
pub fn decode_file(path: &Path) -> Result<Vec<f32>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;

    let extension = path.extension().and_then(|ext| ext.to_str());

    let (mut format, track) = demux::probe_and_pick_track(Box::new(file), extension)?;
    let mut decoder = decode::decoder_for_track(&track)?;

    let track_id = track.id;
    let mut pipeline = pipeline::MonoPipeline::new();

    while let Some(packet) = demux::next_packet(&mut format)? {
        if packet.track_id() != track_id {
            continue;
        }

        decode::decode_packet_and_then(&mut decoder, &packet, |decoded| {
            pipeline.push_decoded(&decoded)
        })?;
    }

    pipeline.finish()
}

/// Seconds of audio represented by a mono buffer at the target rate.
pub fn duration_seconds(samples: &[f32]) -> f64 {
    samples.len() as f64 / TARGET_SAMPLE_RATE as f64
}
