//! Blend rules.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{MathError, MathResult};

/// How two neighbouring node values are blended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterpolationRule {
    /// Straight-line blend.
    Linear,
    /// Geometric (log-linear) blend. Requires strictly positive values.
    Geometric,
}

impl InterpolationRule {
    /// Blends `v0` and `v1` at weight `e`.
    ///
    /// `e = 0` returns `v0`, `e = 1` returns `v1`; weights outside `[0, 1]`
    /// extrapolate.
    #[must_use]
    pub fn blend(self, v0: f64, v1: f64, e: f64) -> f64 {
        match self {
            InterpolationRule::Linear => v0 + (v1 - v0) * e,
            InterpolationRule::Geometric => v0 * (v1 / v0).powf(e),
        }
    }

    /// Checks that every node value is admissible for this rule.
    ///
    /// # Errors
    ///
    /// Returns `MathError::InvalidInput` for non-finite values, or for
    /// non-positive values under the geometric rule.
    pub fn validate(self, values: &[f64]) -> MathResult<()> {
        for (i, &v) in values.iter().enumerate() {
            if !v.is_finite() {
                return Err(MathError::invalid_input(format!(
                    "value[{i}] = {v} is not finite"
                )));
            }
            if self == InterpolationRule::Geometric && v <= 0.0 {
                return Err(MathError::invalid_input(format!(
                    "value[{i}] = {v} is not positive; geometric blend requires positive values"
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for InterpolationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InterpolationRule::Linear => "Linear",
            InterpolationRule::Geometric => "Geometric",
        };
        write!(f, "{name}")
    }
}
