//! Run context: the registries and scenarios of one valuation run.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use rmds_core::Date;
use rmds_curves::CurveRegistry;
use rmds_securities::SecurityRegistry;

use crate::error::{EngineError, EngineResult};
use crate::pipeline::{value_all, ValuationReport};
use crate::scenario::{ScenarioDefinition, ScenarioSet};

/// Computation a run performs once everything is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UseCase {
    /// Base, up and down NPV for every (scenario, security) pair.
    #[serde(rename = "NPV_CALCULATION")]
    NpvCalculation,
}

impl fmt::Display for UseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UseCase::NpvCalculation => write!(f, "NPV_CALCULATION"),
        }
    }
}

impl FromStr for UseCase {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NPV_CALCULATION" | "NPV" => Ok(UseCase::NpvCalculation),
            _ => Err(EngineError::UnsupportedUseCase(s.to_string())),
        }
    }
}

/// Everything a run needs, owned in one place.
///
/// Registries are mutated only while definitions are loaded. Scenarios are
/// built from a snapshot of the curve registry, after which valuation only
/// borrows.
#[derive(Debug, Clone)]
pub struct RunContext {
    valuation_date: Date,
    curves: CurveRegistry,
    securities: SecurityRegistry,
    scenarios: ScenarioSet,
}

impl RunContext {
    /// Creates an empty context for a valuation date.
    #[must_use]
    pub fn new(valuation_date: Date) -> Self {
        Self {
            valuation_date,
            curves: CurveRegistry::with_valuation_date(valuation_date),
            securities: SecurityRegistry::with_valuation_date(valuation_date),
            scenarios: ScenarioSet::new(),
        }
    }

    /// Run valuation date.
    #[must_use]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Curve registry.
    #[must_use]
    pub fn curves(&self) -> &CurveRegistry {
        &self.curves
    }

    /// Curve registry, for loading.
    pub fn curves_mut(&mut self) -> &mut CurveRegistry {
        &mut self.curves
    }

    /// Security registry.
    #[must_use]
    pub fn securities(&self) -> &SecurityRegistry {
        &self.securities
    }

    /// Security registry, for loading.
    pub fn securities_mut(&mut self) -> &mut SecurityRegistry {
        &mut self.securities
    }

    /// Scenarios built so far.
    #[must_use]
    pub fn scenarios(&self) -> &ScenarioSet {
        &self.scenarios
    }

    /// Builds the scenarios from the current curves, replacing any built
    /// before. Curves added afterwards are not seen by valuation.
    pub fn build_scenarios(&mut self, definition: &ScenarioDefinition) -> EngineResult<usize> {
        self.scenarios = definition.build(&self.curves)?;
        Ok(self.scenarios.len())
    }

    /// Runs a use case over the loaded securities and built scenarios.
    #[must_use]
    pub fn execute(&self, use_case: UseCase) -> ValuationReport {
        info!(%use_case, "executing use case");
        match use_case {
            UseCase::NpvCalculation => value_all(&self.securities, &self.scenarios),
        }
    }
}
