//! Engine error types.

use rmds_core::{Date, ErrorKind};
use rmds_curves::CurveError;
use rmds_securities::SecurityError;
use thiserror::Error;

/// A specialized Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine error type.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// Curve construction or lookup failed.
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// Security construction or valuation failed.
    #[error(transparent)]
    Security(#[from] SecurityError),

    /// No valuation date from the scenario definition or the registries.
    #[error("no valuation date available for scenario {scenario}")]
    MissingValuationDate {
        /// Scenario being built.
        scenario: String,
    },

    /// A valuation produced NaN or infinity.
    #[error("{leg} NPV of {security} in {scenario}@{date} is not finite: {value}")]
    NonFiniteNpv {
        /// Security identifier.
        security: String,
        /// Scenario name.
        scenario: String,
        /// Scenario date.
        date: Date,
        /// Curve set leg (`BASE`, `UP`, `DOWN`).
        leg: &'static str,
        /// Offending value.
        value: f64,
    },

    /// The use case name is not recognised.
    #[error("unsupported use case: {0}")]
    UnsupportedUseCase(String),
}

impl EngineError {
    /// Returns the error kind for this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Curve(e) => e.kind(),
            Self::Security(e) => e.kind(),
            Self::MissingValuationDate { .. }
            | Self::NonFiniteNpv { .. }
            | Self::UnsupportedUseCase(_) => ErrorKind::Construction,
        }
    }
}
