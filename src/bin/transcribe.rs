//! The `transcribe` binary: a thin argv/exit-code shell around the library.
//!
//! Contract:
//! - exactly one JSON line on stdout per processed run, exit code 0
//!   (failures inside transcription are reported in-band via `success: false`)
//! - argument and file pre-flight failures print a two-field JSON error and
//!   exit with code 1

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;

use transcribe::adapter;
use transcribe::config::Config;
use transcribe::logging;
use transcribe::request::TranscriptionRequest;

#[derive(Parser, Debug)]
#[command(name = "transcribe")]
#[command(about = "Transcribe an audio file and print one JSON result line")]
struct Args {
    /// Audio file to transcribe.
    audio_file: Option<PathBuf>,

    /// ISO 639-1 language hint; defaults to "en", empty string means
    /// auto-detect.
    language: Option<String>,

    /// Extra positional arguments are accepted and ignored.
    #[arg(trailing_var_arg = true, hide = true)]
    extra: Vec<String>,
}

/// Pre-flight errors carry no `text` field, unlike adapter results.
#[derive(Serialize)]
struct PreflightError {
    success: bool,
    error: String,
}

fn preflight_exit(error: String) -> ExitCode {
    let report = PreflightError {
        success: false,
        error,
    };

    match serde_json::to_string(&report) {
        Ok(line) => println!("{line}"),
        Err(err) => eprintln!("transcribe: {err}"),
    }

    ExitCode::FAILURE
}

fn main() -> ExitCode {
    logging::init();

    match Args::try_parse() {
        Ok(Args {
            audio_file: Some(path),
            language,
            ..
        }) => run(path, language.unwrap_or_else(|| "en".to_string())),
        _ => preflight_exit("Usage: transcribe <audio_file> [language]".to_string()),
    }
}

fn run(audio_file: PathBuf, language: String) -> ExitCode {
    if !audio_file.exists() {
        return preflight_exit(format!("File not found: {}", audio_file.display()));
    }

    let request = TranscriptionRequest::new(audio_file, language);
    let config = Config::from_env();

    let result = adapter::transcribe(&request, &config);

    match result.to_json() {
        Ok(line) => {
            println!("{line}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("transcribe: {err}");
            ExitCode::FAILURE
        }
    }
}
