//! Codec-level decoding on top of Symphonia.

use anyhow::{Context, anyhow};
use symphonia::core::audio::AudioBufferRef;
use symphonia::core::codecs::{Decoder, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{Packet, Track};

use crate::Result;

/// Create a decoder for the selected audio track using Symphonia's default
/// codec registry.
pub fn decoder_for_track(track: &Track) -> Result<Box<dyn Decoder>> {
    let decoder_opts: DecoderOptions = Default::default();

    Ok(symphonia::default::get_codecs()
        .make(&track.codec_params, &decoder_opts)
        .map_err(|e| anyhow!(e))
        .context("failed to create decoder for audio track")?)
}

/// Decode a packet and hand the decoded buffer to a callback.
///
/// Returns `Ok(true)` when a buffer was produced, `Ok(false)` when the packet
/// was skipped.
///
/// Error policy:
/// - `DecodeError` skips the bad frame and keeps going
/// - `IoError` is treated as end-of-stream
/// - anything else is fatal
pub fn decode_packet_and_then(
    decoder: &mut Box<dyn Decoder>,
    packet: &Packet,
    mut on_decoded: impl FnMut(AudioBufferRef<'_>) -> Result<()>,
) -> Result<bool> {
    match decoder.decode(packet) {
        Ok(buf) => {
            on_decoded(buf)?;
            Ok(true)
        }

        Err(SymphoniaError::DecodeError(_)) => Ok(false),
        Err(SymphoniaError::IoError(_)) => Ok(false),

        Err(e) => Err(anyhow!(e).context("decoder failure").into()),
    }
}
