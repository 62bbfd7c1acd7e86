//! Decode real WAV files through the audio stack and check the mono 16 kHz
//! output shape.

use std::f32::consts::TAU;
use std::path::Path;

use anyhow::Result;

use transcribe::audio::{self, TARGET_SAMPLE_RATE};

fn write_wav(path: &Path, channels: u16, sample_rate: u32, frames: usize) -> Result<()> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;

    // A 440 Hz tone keeps the content nontrivial without mattering to shape
    // assertions.
    for frame in 0..frames {
        let t = frame as f32 / sample_rate as f32;
        let value = (0.5 * (TAU * 440.0 * t).sin() * i16::MAX as f32) as i16;
        for _ in 0..channels {
            writer.write_sample(value)?;
        }
    }

    writer.finalize()?;
    Ok(())
}

#[test]
fn mono_16k_wav_passes_through_unresampled() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("tone.wav");

    let frames = TARGET_SAMPLE_RATE as usize; // one second
    write_wav(&path, 1, TARGET_SAMPLE_RATE, frames)?;

    let samples = audio::decode_file(&path)?;

    assert_eq!(samples.len(), frames);
    assert!((audio::duration_seconds(&samples) - 1.0).abs() < 1e-9);
    assert!(samples.iter().all(|s| s.is_finite()));
    Ok(())
}

#[test]
fn stereo_44k_wav_is_downmixed_and_resampled() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("stereo.wav");

    let src_rate = 44_100u32;
    let frames = src_rate as usize * 2; // two seconds
    write_wav(&path, 2, src_rate, frames)?;

    let samples = audio::decode_file(&path)?;

    // 44.1 kHz -> 16 kHz shrinks the frame count to ~36%; the resampler's
    // block padding and filter delay shift the exact figure, so allow slack.
    let ideal = frames * TARGET_SAMPLE_RATE as usize / src_rate as usize;
    assert!(
        samples.len() > ideal / 2 && samples.len() < ideal * 2,
        "unexpected output length {} for ideal {ideal}",
        samples.len()
    );
    assert!(samples.iter().all(|s| s.is_finite()));
    Ok(())
}

#[test]
fn tone_amplitude_survives_decoding() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("loud.wav");

    write_wav(&path, 1, TARGET_SAMPLE_RATE, 8_000)?;

    let samples = audio::decode_file(&path)?;

    let peak = samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
    assert!(peak > 0.4 && peak <= 1.0, "unexpected peak {peak}");
    Ok(())
}

#[test]
fn unreadable_file_is_an_error() {
    let err = audio::decode_file(Path::new("/no/such/audio.wav")).unwrap_err();
    assert!(err.to_string().contains("failed to open"));
}
