//! # RMDS Math
//!
//! Numerical primitives for the RMDS risk valuation workspace.
//!
//! This crate provides:
//!
//! - **Solvers**: bracketed bisection with an explicit iteration cap and
//!   residual tolerance
//! - **Interpolation**: segment selection with flat-left / last-segment
//!   extrapolation and the linear and geometric (log-linear) blend rules

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]

pub mod error;
pub mod interpolation;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{locate_segment, InterpolationRule, Segment};
    pub use crate::solvers::{bisection, try_bisection, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
