//! Scenarios: a dated base curve set with its up and down shocks.
//!
//! Scenarios are built once from a snapshot of the curve registry and are
//! read-only afterwards, so valuation borrows them without copying.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use rmds_core::Date;
use rmds_curves::scenario::{ScenarioBuilder, ShockSpec};
use rmds_curves::{CurveRegistry, CurveSet};

use crate::error::{EngineError, EngineResult};

/// Name of the scenario every run produces.
pub const BASE_SCENARIO: &str = "BASE";

/// Shock applied when a definition does not name one.
pub const DEFAULT_SHOCK_FACTOR: f64 = 0.1;

/// One of the three curve sets a scenario carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioLeg {
    /// Unshocked curves.
    Base,
    /// Curves scaled by `1 + f`.
    Up,
    /// Curves scaled by `1 - f`.
    Down,
}

impl ScenarioLeg {
    /// All legs in reporting order.
    pub const ALL: [ScenarioLeg; 3] = [ScenarioLeg::Base, ScenarioLeg::Up, ScenarioLeg::Down];

    /// Upper-case label used in output columns.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ScenarioLeg::Base => "BASE",
            ScenarioLeg::Up => "UP",
            ScenarioLeg::Down => "DOWN",
        }
    }
}

impl fmt::Display for ScenarioLeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A named, dated scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    name: String,
    date: Date,
    base: CurveSet,
    up: CurveSet,
    down: CurveSet,
}

impl Scenario {
    /// Builds a scenario, deriving up and down sets from `base`.
    ///
    /// # Errors
    ///
    /// Propagates curve errors from the shock.
    pub fn new(
        name: impl Into<String>,
        date: Date,
        base: CurveSet,
        builder: &ScenarioBuilder,
    ) -> EngineResult<Self> {
        let (up, down) = builder.build(&base)?;
        Ok(Self {
            name: name.into(),
            date,
            base,
            up,
            down,
        })
    }

    /// Scenario name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Scenario (valuation) date.
    #[must_use]
    pub fn date(&self) -> Date {
        self.date
    }

    /// Unshocked curves.
    #[must_use]
    pub fn base(&self) -> &CurveSet {
        &self.base
    }

    /// Up-shocked curves.
    #[must_use]
    pub fn up(&self) -> &CurveSet {
        &self.up
    }

    /// Down-shocked curves.
    #[must_use]
    pub fn down(&self) -> &CurveSet {
        &self.down
    }

    /// Curve set for a leg.
    #[must_use]
    pub fn curves(&self, leg: ScenarioLeg) -> &CurveSet {
        match leg {
            ScenarioLeg::Base => &self.base,
            ScenarioLeg::Up => &self.up,
            ScenarioLeg::Down => &self.down,
        }
    }
}

/// Scenarios keyed by `(name, date)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioSet {
    scenarios: BTreeMap<(String, Date), Scenario>,
}

impl ScenarioSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a scenario, returning any scenario it replaced.
    pub fn insert(&mut self, scenario: Scenario) -> Option<Scenario> {
        self.scenarios
            .insert((scenario.name.clone(), scenario.date), scenario)
    }

    /// Looks up a scenario.
    #[must_use]
    pub fn get(&self, name: &str, date: Date) -> Option<&Scenario> {
        self.scenarios.get(&(name.to_string(), date))
    }

    /// Scenarios in `(name, date)` order.
    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.values()
    }

    /// Number of scenarios.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Returns true if there are no scenarios.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

impl FromIterator<Scenario> for ScenarioSet {
    fn from_iter<I: IntoIterator<Item = Scenario>>(iter: I) -> Self {
        let mut set = ScenarioSet::new();
        for scenario in iter {
            set.insert(scenario);
        }
        set
    }
}

impl<'a> IntoIterator for &'a ScenarioSet {
    type Item = &'a Scenario;
    type IntoIter = btree_map::Values<'a, (String, Date), Scenario>;

    fn into_iter(self) -> Self::IntoIter {
        self.scenarios.values()
    }
}

fn default_shock_factor() -> f64 {
    DEFAULT_SHOCK_FACTOR
}

/// Scenario definition as read from a run's scenario file.
///
/// ```json
/// { "valuation_date": "2020-12-30", "shock_factor": 0.1, "risk_factors": ["OIS.USD"] }
/// ```
///
/// Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    /// Scenario date; defaults to the registry's valuation date.
    #[serde(default)]
    pub valuation_date: Option<Date>,
    /// Relative shock size.
    #[serde(default = "default_shock_factor")]
    pub shock_factor: f64,
    /// Curve names to shock; empty shocks every curve.
    #[serde(default, alias = "IR_risk_factors")]
    pub risk_factors: Vec<String>,
}

impl Default for ScenarioDefinition {
    fn default() -> Self {
        Self {
            valuation_date: None,
            shock_factor: DEFAULT_SHOCK_FACTOR,
            risk_factors: Vec::new(),
        }
    }
}

impl ScenarioDefinition {
    /// Parses a definition from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Sets the shock factor.
    #[must_use]
    pub fn with_shock_factor(mut self, factor: f64) -> Self {
        self.shock_factor = factor;
        self
    }

    /// The shock this definition describes.
    pub fn shock_spec(&self) -> EngineResult<ShockSpec> {
        Ok(ShockSpec::new(self.shock_factor)?.with_risk_factors(self.risk_factors.iter().cloned()))
    }

    /// Builds the run's scenarios from a snapshot of `registry`.
    ///
    /// Produces exactly one scenario, [`BASE_SCENARIO`], dated by the
    /// definition or else by the registry.
    ///
    /// # Errors
    ///
    /// - `EngineError::MissingValuationDate` if neither supplies a date
    /// - curve errors for an invalid shock
    pub fn build(&self, registry: &CurveRegistry) -> EngineResult<ScenarioSet> {
        let date = self
            .valuation_date
            .or_else(|| registry.valuation_date())
            .ok_or_else(|| EngineError::MissingValuationDate {
                scenario: BASE_SCENARIO.to_string(),
            })?;
        let builder = ScenarioBuilder::new(self.shock_spec()?);
        let scenario = Scenario::new(BASE_SCENARIO, date, registry.snapshot(), &builder)?;
        info!(
            scenario = BASE_SCENARIO,
            %date,
            curves = scenario.base().len(),
            shock = self.shock_factor,
            "scenario built"
        );
        Ok(std::iter::once(scenario).collect())
    }
}
