//! Evaluator configuration management
//!
//! Handles loading configuration from defaults, TOML files and environment
//! variables.
//!
//! | Key | Environment variable | Default |
//! |-----|----------------------|---------|
//! | `anchor_sd` | `SSM_ANCHOR_SD` | `1e-5` |
//! | `parallel_threshold` | `SSM_PARALLEL_THRESHOLD` | `256` |
//! | `min_chunk_len` | `SSM_MIN_CHUNK_LEN` | `64` |
//! | `mode` | `SSM_EXECUTION_MODE` | `auto` |

use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use ssm_models::process::DEFAULT_TINY;

use crate::parallel::DEFAULT_MIN_CHUNK_LEN;

/// Step count from which `Auto` mode reduces in parallel by default.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

/// Environment variable overriding `anchor_sd`.
pub const ENV_ANCHOR_SD: &str = "SSM_ANCHOR_SD";
/// Environment variable overriding `parallel_threshold`.
pub const ENV_PARALLEL_THRESHOLD: &str = "SSM_PARALLEL_THRESHOLD";
/// Environment variable overriding `min_chunk_len`.
pub const ENV_MIN_CHUNK_LEN: &str = "SSM_MIN_CHUNK_LEN";
/// Environment variable overriding `mode`.
pub const ENV_EXECUTION_MODE: &str = "SSM_EXECUTION_MODE";

const ENV_KEYS: [&str; 4] = [
    ENV_ANCHOR_SD,
    ENV_PARALLEL_THRESHOLD,
    ENV_MIN_CHUNK_LEN,
    ENV_EXECUTION_MODE,
];

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Anchor standard deviation must be finite and strictly positive
    #[error("Invalid anchor standard deviation: {0}. Must be finite and > 0")]
    InvalidAnchorSd(f64),

    /// Parallel work items need at least one step
    #[error("Invalid minimum chunk length: {0}. Must be >= 1")]
    InvalidChunkLength(usize),

    /// Unknown execution mode name
    #[error("Invalid execution mode: {0}. Must be one of: auto, sequential, parallel")]
    InvalidMode(String),

    /// Reading or parsing a configuration file failed
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// An environment variable could not be parsed
    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// How per-step contributions are reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Parallel at or above `parallel_threshold` steps, sequential below
    #[default]
    Auto,
    /// Always a single sequential fold
    Sequential,
    /// Always the Rayon reduction
    Parallel,
}

impl FromStr for ExecutionMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ExecutionMode::Auto),
            "sequential" | "seq" => Ok(ExecutionMode::Sequential),
            "parallel" | "par" => Ok(ExecutionMode::Parallel),
            _ => Err(ConfigError::InvalidMode(s.to_string())),
        }
    }
}

impl ExecutionMode {
    /// Lower-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::Auto => "auto",
            ExecutionMode::Sequential => "sequential",
            ExecutionMode::Parallel => "parallel",
        }
    }
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Likelihood evaluator configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Standard deviation pinning the first correlated-random-walk state,
    /// also the variance of its location innovation slots
    pub anchor_sd: f64,
    /// Step count from which `Auto` mode reduces in parallel
    pub parallel_threshold: usize,
    /// Minimum number of steps per Rayon work item
    pub min_chunk_len: usize,
    /// Reduction strategy
    #[serde(deserialize_with = "deserialize_mode")]
    pub mode: ExecutionMode,
}

fn deserialize_mode<'de, D>(deserializer: D) -> Result<ExecutionMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    ExecutionMode::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            anchor_sd: DEFAULT_TINY,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            min_chunk_len: DEFAULT_MIN_CHUNK_LEN,
            mode: ExecutionMode::Auto,
        }
    }
}

impl EvaluatorConfig {
    /// Create a new EvaluatorConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Always reduce sequentially.
    pub fn sequential() -> Self {
        Self {
            mode: ExecutionMode::Sequential,
            ..Self::default()
        }
    }

    /// Always reduce in parallel.
    pub fn parallel() -> Self {
        Self {
            mode: ExecutionMode::Parallel,
            ..Self::default()
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EvaluatorConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from a key lookup (environment variable names).
    ///
    /// Keys the lookup does not know leave the field untouched.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_ANCHOR_SD) {
            self.anchor_sd = parse_env(ENV_ANCHOR_SD, &raw)?;
        }
        if let Some(raw) = lookup(ENV_PARALLEL_THRESHOLD) {
            self.parallel_threshold = parse_env(ENV_PARALLEL_THRESHOLD, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MIN_CHUNK_LEN) {
            self.min_chunk_len = parse_env(ENV_MIN_CHUNK_LEN, &raw)?;
        }
        if let Some(raw) = lookup(ENV_EXECUTION_MODE) {
            self.mode = ExecutionMode::from_str(raw.trim())?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.anchor_sd.is_finite() && self.anchor_sd > 0.0) {
            return Err(ConfigError::InvalidAnchorSd(self.anchor_sd));
        }
        if self.min_chunk_len == 0 {
            return Err(ConfigError::InvalidChunkLength(self.min_chunk_len));
        }
        Ok(())
    }

    /// Whether `n_steps` steps should be reduced in parallel.
    #[inline]
    pub fn use_parallel(&self, n_steps: usize) -> bool {
        match self.mode {
            ExecutionMode::Auto => n_steps >= self.parallel_threshold,
            ExecutionMode::Sequential => false,
            ExecutionMode::Parallel => true,
        }
    }
}

fn parse_env<V: FromStr>(key: &str, raw: &str) -> Result<V, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("Cannot parse {}={:?}", key, raw)))
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. Environment variables
/// 2. Config file
/// 3. Default values
pub fn build_config(config_file: Option<&Path>) -> Result<EvaluatorConfig, ConfigError> {
    let mut config = match config_file {
        Some(path) => EvaluatorConfig::from_file(path)?,
        None => EvaluatorConfig::default(),
    };

    if ENV_KEYS.iter().any(|key| std::env::var(key).is_ok()) {
        tracing::debug!("Applying evaluator configuration from environment");
    }
    config.apply_overrides(|key| std::env::var(key).ok())?;

    config.validate()?;
    Ok(config)
}
