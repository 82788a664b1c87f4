//! Configuration management for paintstripper.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file (JSON)
//! 4. Default values

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::error::StripError;
use crate::strip::DEFAULT_CHUNK_SIZE;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Processing options.
    pub processing: ProcessingSection,
    /// Output behaviour.
    pub output: OutputSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Processing configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingSection {
    /// Strip ANSI color sequences.
    pub color: bool,
    /// Nominal read size in bytes.
    pub chunk_size: usize,
}

impl Default for ProcessingSection {
    fn default() -> Self {
        Self {
            color: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Output configuration section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Send console-bound output to the discard sink.
    pub quiet: bool,
    /// Allow overwriting existing output files.
    pub force: bool,
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level (error, warn, info, debug, trace) or a full filter directive.
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Json)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_from(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup (for testing).
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(size) = lookup("PAINTSTRIPPER_CHUNK_SIZE") {
            self.processing.chunk_size = size
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidChunkSize(size.clone()))?;
        }

        if let Some(level) = lookup("PAINTSTRIPPER_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Some(level) = lookup("RUST_LOG") {
            self.logging.level = level;
        }

        Ok(())
    }

    /// Apply CLI argument overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if args.color {
            self.processing.color = true;
        }

        if let Some(size) = args.chunk_size {
            self.processing.chunk_size = size;
        }

        if args.quiet {
            self.output.quiet = true;
        }

        if args.force {
            self.output.force = true;
        }

        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(ref path) = args.config {
            config = Config::from_file(path)?;
        }

        config.apply_env()?;
        config.apply_args(args);

        Ok(config)
    }

    /// Check that the merged configuration can drive a run.
    pub fn validate(&self) -> Result<(), StripError> {
        if self.processing.chunk_size == 0 {
            return Err(StripError::Config("chunk_size must be at least 1".into()));
        }

        if !self.processing.color {
            return Err(StripError::NoProcessingOption);
        }

        Ok(())
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
    /// Chunk size override that is not a number.
    InvalidChunkSize(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config file: {}", e),
            Self::Json(e) => write!(f, "failed to parse config file: {}", e),
            Self::InvalidChunkSize(value) => write!(f, "invalid chunk size: {}", value),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for StripError {
    fn from(e: ConfigError) -> Self {
        StripError::Config(e.to_string())
    }
}
