//! CLI error types.

use rmds_core::{Date, ErrorKind};
use rmds_curves::CurveError;
use rmds_engine::EngineError;
use rmds_ext_file::FileError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// The requested curve is not in the file.
    #[error("Curve {name} as of {date} not found in {file}")]
    CurveNotFound {
        /// Curve name.
        name: String,
        /// As-of date.
        date: Date,
        /// File searched.
        file: String,
    },

    /// One or more curves failed to bootstrap.
    #[error("{failed} of {total} curves failed to bootstrap")]
    Bootstrap {
        /// Failed curves.
        failed: usize,
        /// Curves attempted.
        total: usize,
    },

    /// Definition file error.
    #[error(transparent)]
    File(#[from] FileError),

    /// Curve error.
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// Engine error.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl CliError {
    /// Returns the error kind for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidDate(_) => ErrorKind::Construction,
            Self::CurveNotFound { .. } => ErrorKind::Lookup,
            Self::Bootstrap { .. } => ErrorKind::Convergence,
            Self::File(e) => e.kind(),
            Self::Curve(e) => e.kind(),
            Self::Engine(e) => e.kind(),
        }
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
