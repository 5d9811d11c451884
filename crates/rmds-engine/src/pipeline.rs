//! Batch NPV valuation over every (scenario, security) pair.
//!
//! Each pair is valued on its own copy of the security, scheduled at the
//! scenario date and priced against the base, up and down curve sets. A
//! failing pair is logged and reported; the batch continues.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use rmds_core::{Date, ErrorKind};
use rmds_securities::{Security, SecurityRegistry, Valuation};

use crate::error::{EngineError, EngineResult};
use crate::scenario::{Scenario, ScenarioLeg, ScenarioSet};

/// Decimal places kept in reported NPVs.
pub const NPV_DECIMALS: u32 = 4;

/// One output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Security identifier.
    #[serde(rename = "Security ID")]
    pub security_id: String,
    /// Scenario name.
    #[serde(rename = "Scenario Name")]
    pub scenario_name: String,
    /// Scenario date.
    #[serde(rename = "Scenario Date")]
    pub scenario_date: Date,
    /// NPV against the base curves.
    #[serde(rename = "NPV_BASE")]
    pub npv_base: Decimal,
    /// NPV against the up-shocked curves.
    #[serde(rename = "NPV_UP")]
    pub npv_up: Decimal,
    /// NPV against the down-shocked curves.
    #[serde(rename = "NPV_DOWN")]
    pub npv_down: Decimal,
}

/// A pair that could not be valued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairFailure {
    /// Security identifier.
    pub security_id: String,
    /// Scenario name.
    pub scenario_name: String,
    /// Scenario date.
    pub scenario_date: Date,
    /// Failure category.
    pub kind: ErrorKind,
    /// Error message.
    pub message: String,
}

/// Outcome of a batch run. Row order is unspecified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuationReport {
    /// Valued pairs.
    pub records: Vec<ResultRecord>,
    /// Skipped pairs.
    pub failures: Vec<PairFailure>,
}

impl ValuationReport {
    /// Number of pairs attempted.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.records.len() + self.failures.len()
    }

    /// Returns true if every pair was valued.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Looks up the row for a pair.
    #[must_use]
    pub fn record(&self, security_id: &str, scenario_name: &str) -> Option<&ResultRecord> {
        self.records
            .iter()
            .find(|r| r.security_id == security_id && r.scenario_name == scenario_name)
    }

    /// Failures of one kind.
    pub fn failures_of(&self, kind: ErrorKind) -> impl Iterator<Item = &PairFailure> {
        self.failures.iter().filter(move |f| f.kind == kind)
    }
}

fn round_npv(security: &Security, scenario: &Scenario, leg: ScenarioLeg) -> EngineResult<Decimal> {
    let value = security.npv(scenario.curves(leg))?;
    Decimal::from_f64(value)
        .map(|d| d.round_dp(NPV_DECIMALS))
        .ok_or_else(|| EngineError::NonFiniteNpv {
            security: security.id().to_string(),
            scenario: scenario.name().to_string(),
            date: scenario.date(),
            leg: leg.label(),
            value,
        })
}

/// Values one security in one scenario.
///
/// The registry's copy of the security is left untouched.
///
/// # Errors
///
/// A curve missing from the scenario (Lookup), scheduling failures, or a
/// non-finite NPV.
pub fn value_pair(security: &Security, scenario: &Scenario) -> EngineResult<ResultRecord> {
    for name in security.required_curves() {
        scenario.base().require(name, scenario.date())?;
    }

    let mut security = security.clone();
    security.schedule_cashflows(scenario.date())?;

    let [npv_base, npv_up, npv_down] =
        ScenarioLeg::ALL.map(|leg| round_npv(&security, scenario, leg));
    let (npv_base, npv_up, npv_down) = (npv_base?, npv_up?, npv_down?);

    debug!(
        security = security.id(),
        scenario = scenario.name(),
        %npv_base,
        "valued pair"
    );

    Ok(ResultRecord {
        security_id: security.id().to_string(),
        scenario_name: scenario.name().to_string(),
        scenario_date: scenario.date(),
        npv_base,
        npv_up,
        npv_down,
    })
}

type Pair<'a> = (&'a Scenario, &'a Security);

#[cfg(feature = "parallel")]
fn map_pairs(pairs: &[Pair<'_>]) -> Vec<EngineResult<ResultRecord>> {
    use rayon::prelude::*;
    pairs
        .par_iter()
        .map(|(scenario, security)| value_pair(security, scenario))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn map_pairs(pairs: &[Pair<'_>]) -> Vec<EngineResult<ResultRecord>> {
    pairs
        .iter()
        .map(|(scenario, security)| value_pair(security, scenario))
        .collect()
}

/// Values every security in every scenario.
#[must_use]
pub fn value_all(securities: &SecurityRegistry, scenarios: &ScenarioSet) -> ValuationReport {
    let pairs: Vec<Pair<'_>> = scenarios
        .iter()
        .flat_map(|scenario| securities.iter().map(move |security| (scenario, security)))
        .collect();

    info!(
        scenarios = scenarios.len(),
        securities = securities.len(),
        pairs = pairs.len(),
        "starting valuation"
    );

    let mut report = ValuationReport::default();
    for ((scenario, security), result) in pairs.iter().zip(map_pairs(&pairs)) {
        match result {
            Ok(record) => report.records.push(record),
            Err(e) => {
                warn!(
                    security = security.id(),
                    scenario = scenario.name(),
                    kind = %e.kind(),
                    error = %e,
                    "pair skipped"
                );
                report.failures.push(PairFailure {
                    security_id: security.id().to_string(),
                    scenario_name: scenario.name().to_string(),
                    scenario_date: scenario.date(),
                    kind: e.kind(),
                    message: e.to_string(),
                });
            }
        }
    }

    info!(
        valued = report.records.len(),
        failed = report.failures.len(),
        "valuation complete"
    );
    report
}
