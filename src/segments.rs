//! Transcript segments and text assembly.

use anyhow::{Context, Result};
use whisper_rs::{WhisperSegment, WhisperState};

/// One recognized span of speech.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub start_seconds: f32,
    pub end_seconds: f32,
    pub text: String,
}

/// Collect all segments from a completed inference pass, in order.
pub fn collect_segments(state: &WhisperState) -> Result<Vec<Segment>> {
    let mut segments: Vec<Segment> = Vec::new();
    for segment in state.as_iter() {
        segments.push(convert_segment(segment)?);
    }

    Ok(segments)
}

fn convert_segment(segment: WhisperSegment) -> Result<Segment> {
    let text = segment
        .to_str()
        .context("failed to read segment text")?
        .to_string();

    Ok(Segment {
        start_seconds: centiseconds_to_seconds(segment.start_timestamp()),
        end_seconds: centiseconds_to_seconds(segment.end_timestamp()),
        text,
    })
}

/// Whisper timestamps arrive in centiseconds. Negative values can appear on
/// the first segment and are clamped to zero.
pub fn centiseconds_to_seconds(centiseconds: i64) -> f32 {
    if centiseconds <= 0 {
        return 0.0;
    }

    centiseconds as f32 / 100.0
}

/// Assemble the transcript by trimming each segment and joining with single
/// spaces, preserving segment order. Whitespace-only segments trim to empty
/// strings but still take part in the join.
pub fn join_trimmed(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|segment| segment.text.trim())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Assemble the transcript by concatenating raw segment texts and trimming
/// once at the ends. Interior whitespace is preserved as the model produced
/// it.
pub fn concat_trimmed(segments: &[Segment]) -> String {
    let combined: String = segments.iter().map(|segment| segment.text.as_str()).collect();
    combined.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str) -> Segment {
        Segment {
            start_seconds: 0.0,
            end_seconds: 1.0,
            text: text.to_string(),
        }
    }

    #[test]
    fn join_trims_each_segment() {
        let segments = [segment(" Hello"), segment(" world. "), segment("Bye.")];

        assert_eq!(join_trimmed(&segments), "Hello world. Bye.");
    }

    #[test]
    fn join_keeps_whitespace_only_segments_in_place() {
        let segments = [segment("a"), segment("   "), segment("b")];

        assert_eq!(join_trimmed(&segments), "a  b");
    }

    #[test]
    fn join_of_nothing_is_empty() {
        assert_eq!(join_trimmed(&[]), "");
    }

    #[test]
    fn concat_trims_only_the_ends() {
        let segments = [segment(" Hello"), segment(" world ")];

        assert_eq!(concat_trimmed(&segments), "Hello world");
    }

    #[test]
    fn negative_timestamps_clamp_to_zero() {
        assert_eq!(centiseconds_to_seconds(-3), 0.0);
        assert_eq!(centiseconds_to_seconds(0), 0.0);
        assert_eq!(centiseconds_to_seconds(150), 1.5);
    }
}
