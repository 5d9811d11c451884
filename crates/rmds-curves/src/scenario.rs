//! Proportional curve shocks.
//!
//! A shock multiplies every value of a curve by `1 + f` (up) or `1 - f`
//! (down). Offsets are copied unchanged and each shocked curve owns new
//! value storage. Up and down sets always carry exactly the keys of the
//! base set; curves outside a risk-factor filter are copied unshocked.

use serde::Serialize;
use tracing::debug;

use crate::curve_set::CurveSet;
use crate::error::{CurveError, CurveResult};

/// Shock size and the curves it applies to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShockSpec {
    factor: f64,
    risk_factors: Vec<String>,
}

impl ShockSpec {
    /// Creates a shock of relative size `factor` applied to every curve.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidShock` if `factor` is not finite. Any
    /// finite factor is accepted here; a factor that drives a discount
    /// factor to zero or below fails when that curve is shocked.
    pub fn new(factor: f64) -> CurveResult<Self> {
        if !factor.is_finite() {
            return Err(CurveError::invalid_shock(format!(
                "shock factor must be finite, got {factor}"
            )));
        }
        Ok(Self {
            factor,
            risk_factors: Vec::new(),
        })
    }

    /// Restricts the shock to the named curves. An empty list shocks all.
    #[must_use]
    pub fn with_risk_factors<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.risk_factors = names.into_iter().map(Into::into).collect();
        self
    }

    /// Relative shock size.
    #[must_use]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Curve names the shock is restricted to.
    #[must_use]
    pub fn risk_factors(&self) -> &[String] {
        &self.risk_factors
    }

    /// Returns true if curves named `name` are shocked.
    #[must_use]
    pub fn applies_to(&self, name: &str) -> bool {
        self.risk_factors.is_empty() || self.risk_factors.iter().any(|r| r == name)
    }
}

/// Derives up and down curve sets from a base set.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioBuilder {
    spec: ShockSpec,
}

impl ScenarioBuilder {
    /// Creates a builder for a shock.
    #[must_use]
    pub fn new(spec: ShockSpec) -> Self {
        Self { spec }
    }

    /// Creates a builder shocking every curve by `factor`.
    pub fn proportional(factor: f64) -> CurveResult<Self> {
        ShockSpec::new(factor).map(Self::new)
    }

    /// The shock applied.
    #[must_use]
    pub fn spec(&self) -> &ShockSpec {
        &self.spec
    }

    /// Builds `(up, down)` from `base`.
    ///
    /// An empty base gives two empty sets.
    pub fn build(&self, base: &CurveSet) -> CurveResult<(CurveSet, CurveSet)> {
        let f = self.spec.factor;
        let mut up = CurveSet::new();
        let mut down = CurveSet::new();

        for curve in base.curves() {
            if self.spec.applies_to(curve.name()) {
                up.insert(curve.map_values(|v| v * (1.0 + f))?);
                down.insert(curve.map_values(|v| v * (1.0 - f))?);
            } else {
                debug!(curve = %curve.key(), "outside risk factors, copied unshocked");
                up.insert(curve.clone());
                down.insert(curve.clone());
            }
        }

        Ok((up, down))
    }
}
