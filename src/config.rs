//! Runtime configuration resolved from the environment.
//!
//! Two variables control the adapter:
//! - `WHISPER_MODEL` selects the primary model size (defaults to `base`)
//! - `WHISPER_MODEL_DIR` points at the directory holding ggml artifacts
//!   (defaults to `./models`)
//!
//! Model artifacts follow the ggml naming convention used by the
//! model-downloader: `ggml-<size>.bin` for full precision and
//! `ggml-<size>-q8_0.bin` for int8 quantized weights.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// The model sizes the adapter knows how to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelSize {
    Tiny,
    #[default]
    Base,
    Small,
    Medium,
    Large,
}

impl ModelSize {
    pub const ALL: [ModelSize; 5] = [
        ModelSize::Tiny,
        ModelSize::Base,
        ModelSize::Small,
        ModelSize::Medium,
        ModelSize::Large,
    ];

    /// The size's name as it appears in ggml artifact filenames.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelSize::Tiny => "tiny",
            ModelSize::Base => "base",
            ModelSize::Small => "small",
            ModelSize::Medium => "medium",
            ModelSize::Large => "large",
        }
    }
}

impl fmt::Display for ModelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelSize {
    type Err = UnknownModelSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tiny" => Ok(ModelSize::Tiny),
            "base" => Ok(ModelSize::Base),
            "small" => Ok(ModelSize::Small),
            "medium" => Ok(ModelSize::Medium),
            "large" => Ok(ModelSize::Large),
            _ => Err(UnknownModelSize(s.to_string())),
        }
    }
}

/// Returned when `WHISPER_MODEL` names a size this adapter doesn't resolve.
#[derive(Debug)]
pub struct UnknownModelSize(pub String);

impl fmt::Display for UnknownModelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown model size: {:?}", self.0)
    }
}

impl std::error::Error for UnknownModelSize {}

/// How inference should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Execution {
    /// Run on CPU (whisper.cpp's `use_gpu = false`).
    pub cpu: bool,
    /// Prefer int8 quantized artifacts when both variants are installed.
    pub prefer_quantized: bool,
}

/// Resolved adapter configuration.
#[derive(Debug, Clone)]
pub struct Config {
    model_size: ModelSize,
    model_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_size: ModelSize::default(),
            model_dir: PathBuf::from("./models"),
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("WHISPER_MODEL") {
            match raw.parse::<ModelSize>() {
                Ok(size) => config.model_size = size,
                Err(err) => {
                    tracing::warn!(%err, default = %config.model_size, "falling back to default model size");
                }
            }
        }

        if let Some(dir) = lookup("WHISPER_MODEL_DIR") {
            if !dir.is_empty() {
                config.model_dir = PathBuf::from(dir);
            }
        }

        config
    }

    pub fn model_size(&self) -> ModelSize {
        self.model_size
    }

    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    /// Locate the installed ggml artifact for `size`, if any.
    ///
    /// Quantized int8 weights are preferred over full precision when both are
    /// present, matching [`Execution::prefer_quantized`].
    pub fn model_path(&self, size: ModelSize) -> Option<PathBuf> {
        let quantized = self.model_dir.join(format!("ggml-{size}-q8_0.bin"));
        if quantized.is_file() {
            return Some(quantized);
        }

        let full = self.model_dir.join(format!("ggml-{size}.bin"));
        full.is_file().then_some(full)
    }

    /// Locate an installed Silero VAD artifact, if any.
    ///
    /// The filename carries a version suffix (`ggml-silero-v5.1.2.bin`), so
    /// the directory is scanned rather than probed for one exact name. Picks
    /// the lexicographically last match so a newer version wins.
    pub fn vad_model_path(&self) -> Option<PathBuf> {
        let entries = std::fs::read_dir(&self.model_dir).ok()?;

        let mut candidates: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .file_name()
                        .and_then(|name| name.to_str())
                        .is_some_and(|name| {
                            name.starts_with("ggml-silero-") && name.ends_with(".bin")
                        })
            })
            .collect();

        candidates.sort();
        candidates.pop()
    }

    /// Decide how inference runs.
    ///
    /// Always CPU with int8 weights preferred. Metal-capable builds are
    /// detected and logged but execution does not change.
    // TODO: pass use_gpu=true through WhisperContextParameters when the
    // `metal` feature is enabled, once the quantized models are validated
    // against the Metal path.
    pub fn execution(&self) -> Execution {
        if cfg!(feature = "metal") {
            tracing::debug!("metal support compiled in; staying on cpu");
        }

        Execution {
            cpu: true,
            prefer_quantized: true,
        }
    }
}
