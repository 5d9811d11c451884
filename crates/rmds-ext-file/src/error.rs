//! File adapter error types.

use std::path::{Path, PathBuf};

use rmds_core::{CoreError, ErrorKind};
use rmds_curves::CurveError;
use rmds_engine::EngineError;
use rmds_securities::SecurityError;
use thiserror::Error;

/// A specialized Result type for file operations.
pub type FileResult<T> = Result<T, FileError>;

/// Errors raised while reading or writing definition files.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FileError {
    /// The file could not be opened, read or written.
    #[error("I/O error on {}: {message}", path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        message: String,
    },

    /// A delimited file is malformed.
    #[error("parse error at {location}: {message}")]
    Parse {
        /// File and line.
        location: String,
        /// What is wrong.
        message: String,
    },

    /// A JSON document is malformed or misses required fields.
    #[error("invalid JSON in {}: {message}", path.display())]
    Json {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        message: String,
    },

    /// Error from the core types.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Curve or instrument construction failed.
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// Security construction failed.
    #[error(transparent)]
    Security(#[from] SecurityError),

    /// Scenario or run setup failed.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl FileError {
    /// Creates an I/O error.
    pub fn io(path: impl AsRef<Path>, err: impl std::fmt::Display) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            message: err.to_string(),
        }
    }

    /// Creates a parse error.
    pub fn parse(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Creates a JSON error.
    pub fn json(path: impl AsRef<Path>, err: impl std::fmt::Display) -> Self {
        Self::Json {
            path: path.as_ref().to_path_buf(),
            message: err.to_string(),
        }
    }

    /// Returns the error kind for this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. } | Self::Parse { .. } | Self::Json { .. } => ErrorKind::Construction,
            Self::Core(e) => e.kind(),
            Self::Curve(e) => e.kind(),
            Self::Security(e) => e.kind(),
            Self::Engine(e) => e.kind(),
        }
    }
}
