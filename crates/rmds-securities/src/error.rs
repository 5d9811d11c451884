//! Error types for security construction and valuation.

use rmds_core::{CoreError, Date, ErrorKind};
use thiserror::Error;

/// A specialized Result type for security operations.
pub type SecurityResult<T> = Result<T, SecurityError>;

/// Errors raised while building or valuing securities.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SecurityError {
    /// Configuration rejected at setup.
    #[error("Invalid configuration for {id}: {reason}")]
    InvalidConfig {
        /// Security identifier.
        id: String,
        /// What is wrong.
        reason: String,
    },

    /// A required record field is absent or empty.
    #[error("Missing field: {field}")]
    MissingField {
        /// Field name.
        field: String,
    },

    /// A record field could not be parsed.
    #[error("Invalid field {field} = '{value}': {reason}")]
    InvalidField {
        /// Field name.
        field: String,
        /// Raw value.
        value: String,
        /// Parse failure.
        reason: String,
    },

    /// The type discriminator names no known variant.
    #[error("Unknown security type: {sec_type}")]
    UnknownType {
        /// Rejected discriminator.
        sec_type: String,
    },

    /// Valuation requested before cashflows were scheduled.
    #[error("Security {id} has no valuation date; schedule cashflows first")]
    NotScheduled {
        /// Security identifier.
        id: String,
    },

    /// Required curve absent from the curve set.
    #[error("Curve {curve} as of {date} required by {id} not found")]
    CurveNotFound {
        /// Security identifier.
        id: String,
        /// Curve name.
        curve: String,
        /// Valuation date.
        date: Date,
    },

    /// Error from the core types.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl SecurityError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates an invalid field error.
    #[must_use]
    pub fn invalid_field(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Returns the error kind for this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotScheduled { .. } | Self::CurveNotFound { .. } => ErrorKind::Lookup,
            Self::Core(e) => e.kind(),
            _ => ErrorKind::Construction,
        }
    }
}
