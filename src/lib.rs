//! `transcribe` — a speech-to-text command-line adapter built on top of Whisper.
//!
//! This crate provides:
//! - A provider chain (primary + fallback) over whisper.cpp inference
//! - Audio decoding for any container Symphonia understands
//! - VAD-based silence filtering
//! - A fixed, single-line JSON result schema
//!
//! The library holds all of the adapter's behavior so it stays testable without
//! spawning processes; the `transcribe` binary is a thin argv/exit-code shell
//! around it.

// High-level API (most consumers should start here).
pub mod adapter;
pub mod config;
pub mod report;
pub mod request;

// Provider seam and the built-in providers.
pub mod provider;
pub mod providers;

// Audio decoding and preprocessing.
pub mod audio;
pub mod vad;

// Segment data structures and transcript assembly.
pub mod segments;

// Error and logging configuration.
pub mod error;
pub mod logging;

pub use error::{Error, Result};
