//! Error types shared across the RMDS workspace.
//!
//! Every crate defines its own error enum, but each of them classifies its
//! variants into one of the [`ErrorKind`] categories. Callers that aggregate
//! failures (the valuation pipeline, the file loaders) report on the kind
//! rather than on crate-specific variants.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Classification of failures across the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Malformed record, too few curve points, duplicate maturities.
    /// Aborts creation of the affected entity only.
    Construction,
    /// A required curve key is absent from a curve set.
    Lookup,
    /// Root search failed to bracket or converge.
    Convergence,
    /// A curve query was neither a date nor a day offset.
    TypeMismatch,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Construction => "construction",
            ErrorKind::Lookup => "lookup",
            ErrorKind::Convergence => "convergence",
            ErrorKind::TypeMismatch => "type-mismatch",
        };
        write!(f, "{name}")
    }
}

/// Errors raised by the core types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Error in date construction or parsing.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Invalid cashflow (non-finite amount).
    #[error("Invalid cashflow: {reason}")]
    InvalidCashflow {
        /// Description of the invalid cashflow.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid cashflow error.
    #[must_use]
    pub fn invalid_cashflow(reason: impl Into<String>) -> Self {
        Self::InvalidCashflow {
            reason: reason.into(),
        }
    }

    /// Returns the error category.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidDate { .. } | Self::InvalidCashflow { .. } => ErrorKind::Construction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_date("2020-13-01");
        assert!(err.to_string().contains("2020-13-01"));
        assert_eq!(err.kind(), ErrorKind::Construction);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ErrorKind::Lookup.to_string(), "lookup");
        assert_eq!(ErrorKind::TypeMismatch.to_string(), "type-mismatch");
    }
}
