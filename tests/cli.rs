//! End-to-end tests for the `transcribe` binary's argv/exit-code/JSON
//! contract. These run the real executable but point it at an empty model
//! directory so no inference happens.

use std::path::Path;
use std::process::{Command, Output};

use anyhow::Result;
use serde_json::Value;

fn run_transcribe(args: &[&str], model_dir: &Path) -> Result<Output> {
    let output = Command::new(env!("CARGO_BIN_EXE_transcribe"))
        .args(args)
        .env("WHISPER_MODEL_DIR", model_dir)
        .env_remove("WHISPER_MODEL")
        .output()?;

    Ok(output)
}

fn parse_single_json_line(stdout: &[u8]) -> Result<Value> {
    let text = std::str::from_utf8(stdout)?;
    let mut lines = text.lines();

    let line = lines.next().expect("expected one line on stdout");
    assert_eq!(lines.next(), None, "expected exactly one line on stdout");

    Ok(serde_json::from_str(line)?)
}

#[test]
fn no_arguments_prints_usage_and_exits_nonzero() -> Result<()> {
    let models = tempfile::tempdir()?;

    let output = run_transcribe(&[], models.path())?;

    assert_eq!(output.status.code(), Some(1));

    let value = parse_single_json_line(&output.stdout)?;
    assert_eq!(value["success"], Value::Bool(false));
    assert_eq!(value["error"], "Usage: transcribe <audio_file> [language]");
    assert!(value.get("text").is_none());
    Ok(())
}

#[test]
fn missing_file_is_reported_verbatim() -> Result<()> {
    let models = tempfile::tempdir()?;

    let output = run_transcribe(&["/no/such/file.wav"], models.path())?;

    assert_eq!(output.status.code(), Some(1));

    let value = parse_single_json_line(&output.stdout)?;
    assert_eq!(value["success"], Value::Bool(false));
    assert_eq!(value["error"], "File not found: /no/such/file.wav");
    assert!(value.get("text").is_none());
    Ok(())
}

#[test]
fn absent_models_produce_in_band_failure_with_exit_zero() -> Result<()> {
    let models = tempfile::tempdir()?;

    let audio_dir = tempfile::tempdir()?;
    let audio_path = audio_dir.path().join("speech.wav");
    std::fs::write(&audio_path, b"not really audio")?;

    let output = run_transcribe(&[audio_path.to_str().unwrap()], models.path())?;

    assert_eq!(output.status.code(), Some(0));

    let value = parse_single_json_line(&output.stdout)?;
    assert_eq!(value["success"], Value::Bool(false));
    assert_eq!(value["text"], "");

    let error = value["error"].as_str().expect("error should be a string");
    assert!(
        error.starts_with("Whisper not available: "),
        "unexpected error: {error}"
    );
    Ok(())
}

#[test]
fn extra_arguments_are_ignored() -> Result<()> {
    let models = tempfile::tempdir()?;

    let output = run_transcribe(&["/no/such/file.wav", "en", "unused", "also-unused"], models.path())?;

    assert_eq!(output.status.code(), Some(1));

    let value = parse_single_json_line(&output.stdout)?;
    assert_eq!(value["error"], "File not found: /no/such/file.wav");
    Ok(())
}
