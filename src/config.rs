//! Analyzer configuration.
//!
//! TOML-backed with sane defaults; every field is optional in the file. The
//! file location can be overridden via `SENTIMENT_CONFIG_PATH`. A sample
//! lives at `config/analyzer.toml`.

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/analyzer.toml";
pub const ENV_CONFIG_PATH: &str = "SENTIMENT_CONFIG_PATH";

/// Matches the trained model's `maxlen`; the ID sequence is always exactly
/// this long.
pub const DEFAULT_MAX_SEQUENCE_LENGTH: usize = 100;
pub const DEFAULT_MAX_BATCH_SIZE: usize = 50;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub max_sequence_length: usize,
    /// Bulk calls are partitioned into batches of this size.
    pub max_batch_size: usize,
    /// Newline-delimited vocab file; `None` or a missing file means the
    /// builtin reserved-token vocabulary.
    pub vocab_path: Option<PathBuf>,
    /// Demo-only score jitter (±0.04). Off by default; tests rely on the
    /// scorer being deterministic.
    pub jitter_enabled: bool,
    pub jitter_seed: Option<u64>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_sequence_length: DEFAULT_MAX_SEQUENCE_LENGTH,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            vocab_path: None,
            jitter_enabled: false,
            jitter_seed: None,
        }
    }
}

impl AnalyzerConfig {
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let cfg: AnalyzerConfig = toml::from_str(toml_str)?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config at {}: {}", path.display(), e))?;
        Self::from_toml_str(&content)
    }

    /// Resolve from `SENTIMENT_CONFIG_PATH` or the default location; any
    /// problem (missing file, bad TOML) falls back to defaults with a log,
    /// because configuration is never allowed to break scoring availability.
    pub fn load() -> Self {
        let path = std::env::var(ENV_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        match Self::from_path(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::debug!(target: "config", error = %e, "using default analyzer config");
                Self::default()
            }
        }
    }
}
