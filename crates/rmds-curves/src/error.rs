//! Error types for curve operations.

use rmds_core::{Date, ErrorKind};
use rmds_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Not enough points to define a curve.
    #[error("Insufficient points: need at least {required}, got {got}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        got: usize,
    },

    /// Offsets and values differ in length.
    #[error("Length mismatch: {offsets} offsets, {values} values")]
    LengthMismatch {
        /// Number of offsets.
        offsets: usize,
        /// Number of values.
        values: usize,
    },

    /// Offsets are not strictly increasing.
    #[error("Non-monotonic offsets at index {index}: {prev} >= {current}")]
    NonMonotonicOffsets {
        /// Index where the violation occurred.
        index: usize,
        /// Previous offset.
        prev: i64,
        /// Current offset.
        current: i64,
    },

    /// A curve value is not admissible for the curve kind.
    #[error("Invalid value: {reason}")]
    InvalidValue {
        /// Description of why the value is invalid.
        reason: String,
    },

    /// Invalid calibration instrument.
    #[error("Invalid instrument: {reason}")]
    InvalidInstrument {
        /// Description of what's wrong with the instrument.
        reason: String,
    },

    /// Two instruments of the same curve share a maturity.
    #[error("Duplicate maturity {maturity} in curve {curve}")]
    DuplicateMaturity {
        /// Curve under construction.
        curve: String,
        /// Shared maturity offset.
        maturity: i64,
    },

    /// Solving one pillar failed, so the curve was not built.
    #[error("Bootstrap of {curve} failed at maturity {maturity}: {reason}")]
    BootstrapFailed {
        /// Curve under construction.
        curve: String,
        /// Maturity of the instrument that failed.
        maturity: i64,
        /// Underlying failure.
        reason: String,
    },

    /// A curve query is neither a day offset nor a date.
    #[error("Type mismatch: expected a day offset or an ISO date, got {got}")]
    TypeMismatch {
        /// Rendering of the rejected query.
        got: String,
    },

    /// A scenario shock is out of range.
    #[error("Invalid shock: {reason}")]
    InvalidShock {
        /// Description of the rejected shock.
        reason: String,
    },

    /// Curve key absent from a curve set.
    #[error("Curve not found: {name} as of {date}")]
    CurveNotFound {
        /// Curve name.
        name: String,
        /// As-of date.
        date: Date,
    },

    /// Error raised by the numerical layer.
    #[error(transparent)]
    Math(#[from] MathError),
}

impl CurveError {
    /// Creates an insufficient points error.
    #[must_use]
    pub fn insufficient_points(required: usize, got: usize) -> Self {
        Self::InsufficientPoints { required, got }
    }

    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }

    /// Creates an invalid instrument error.
    #[must_use]
    pub fn invalid_instrument(reason: impl Into<String>) -> Self {
        Self::InvalidInstrument {
            reason: reason.into(),
        }
    }

    /// Creates a bootstrap failure error.
    #[must_use]
    pub fn bootstrap_failed(curve: impl Into<String>, maturity: i64, reason: impl Into<String>) -> Self {
        Self::BootstrapFailed {
            curve: curve.into(),
            maturity,
            reason: reason.into(),
        }
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(got: impl Into<String>) -> Self {
        Self::TypeMismatch { got: got.into() }
    }

    /// Creates an invalid shock error.
    #[must_use]
    pub fn invalid_shock(reason: impl Into<String>) -> Self {
        Self::InvalidShock {
            reason: reason.into(),
        }
    }

    /// Creates a curve not found error.
    #[must_use]
    pub fn curve_not_found(name: impl Into<String>, date: Date) -> Self {
        Self::CurveNotFound {
            name: name.into(),
            date,
        }
    }

    /// Returns the error kind for this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BootstrapFailed { .. }
            | Self::Math(MathError::ConvergenceFailed { .. } | MathError::InvalidBracket { .. }) => {
                ErrorKind::Convergence
            }
            Self::CurveNotFound { .. } => ErrorKind::Lookup,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            _ => ErrorKind::Construction,
        }
    }
}
