//! Error types for paintstripper.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which of the two output streams an operation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    /// Output with color sequences removed.
    Stripped,
    /// Verbatim copy of the input.
    Unstripped,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stripped => f.write_str("stripped"),
            Self::Unstripped => f.write_str("unstripped"),
        }
    }
}

/// Broad class of a failure, used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad flags, bad config, or an output file that must not be overwritten.
    Configuration,
    /// Input missing, not a regular file, or unreadable.
    Input,
    /// Output could not be created or written.
    Output,
}

/// Main error type for paintstripper operations.
#[derive(Error, Debug)]
pub enum StripError {
    /// No processing option was enabled.
    #[error("you must specify at least one processing option (e.g., --color)")]
    NoProcessingOption,

    /// Both outputs were pointed at the same file.
    #[error("stripped and unstripped output both point to [{0}]")]
    SameOutputPath(PathBuf),

    /// Output file exists and overwriting was not allowed.
    #[error("file exists [{0}], use --force to override")]
    FileExists(PathBuf),

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Input path does not exist or cannot be inspected.
    #[error("cannot access input [{path}]: {source}")]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input path exists but is not a regular file.
    #[error("{0} isn't a file")]
    NotAFile(PathBuf),

    /// Input file could not be opened.
    #[error("failed to open input [{path}]: {source}")]
    OpenInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Read failure mid-stream.
    #[error("failed to read input: {0}")]
    Read(#[source] std::io::Error),

    /// Output file could not be created.
    #[error("failed to open output [{path}]: {source}")]
    OpenOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Write or flush failure on one of the outputs.
    #[error("failed to write {stream} output: {source}")]
    Write {
        stream: Stream,
        #[source]
        source: std::io::Error,
    },
}

impl StripError {
    /// Classify the error for reporting.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NoProcessingOption
            | Self::SameOutputPath(_)
            | Self::FileExists(_)
            | Self::Config(_) => ErrorCategory::Configuration,
            Self::InputNotFound { .. }
            | Self::NotAFile(_)
            | Self::OpenInput { .. }
            | Self::Read(_) => ErrorCategory::Input,
            Self::OpenOutput { .. } | Self::Write { .. } => ErrorCategory::Output,
        }
    }

    /// Whether the help text should accompany the error message.
    pub fn shows_usage(&self) -> bool {
        matches!(self, Self::NoProcessingOption | Self::SameOutputPath(_))
    }
}

/// Convenience Result type for paintstripper operations.
pub type Result<T> = std::result::Result<T, StripError>;
