//! The security type and its valuation capability.

use std::fmt;

use rmds_core::{CashflowSchedule, Date};
use rmds_curves::{Curve, CurveSet};
use tracing::debug;

use crate::bond::BondConfig;
use crate::equity::EquityConfig;
use crate::error::{SecurityError, SecurityResult};

/// Variant-specific behaviour: validation, cashflows and the curve used to
/// value them.
pub trait CashflowModel {
    /// Checks the configuration. Returns the reason on failure.
    fn validate(&self) -> Result<(), String>;

    /// Cashflows from `val_date` on, as offsets from `val_date`.
    fn cashflows(&self, val_date: Date) -> SecurityResult<CashflowSchedule>;

    /// Name of the curve that values the cashflows.
    fn curve_name(&self) -> &str;
}

/// Closed set of security variants.
#[derive(Debug, Clone, PartialEq)]
pub enum SecurityKind {
    /// Fixed-coupon bond discounted on a discount factor curve.
    Bond(BondConfig),
    /// Equity position marked on a price curve.
    Equity(EquityConfig),
}

impl SecurityKind {
    fn model(&self) -> &dyn CashflowModel {
        match self {
            SecurityKind::Bond(config) => config,
            SecurityKind::Equity(config) => config,
        }
    }

    /// Variant name as used by the type discriminator.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            SecurityKind::Bond(_) => "Bond",
            SecurityKind::Equity(_) => "Equity",
        }
    }
}

/// The valuation capability shared by all securities.
pub trait Valuation {
    /// Validates the configuration.
    fn setup(&self) -> SecurityResult<()>;

    /// Sets the valuation date and derives the cashflow schedule for it.
    ///
    /// Calling twice with the same date yields the same schedule.
    fn schedule_cashflows(&mut self, val_date: Date) -> SecurityResult<()>;

    /// Curve names required from any curve set passed to [`npv`](Valuation::npv).
    fn required_curves(&self) -> Vec<&str>;

    /// Net present value against a curve set.
    ///
    /// Each cashflow is weighted by the required curve, keyed by the
    /// valuation date, at the cashflow's offset.
    ///
    /// # Errors
    ///
    /// - `SecurityError::NotScheduled` before any schedule exists
    /// - `SecurityError::CurveNotFound` if the required curve is absent
    fn npv(&self, curves: &CurveSet) -> SecurityResult<f64>;
}

/// A security: identifier, typed configuration, and the schedule derived
/// for its current valuation date.
#[derive(Debug, Clone, PartialEq)]
pub struct Security {
    id: String,
    kind: SecurityKind,
    valuation_date: Option<Date>,
    cashflows: CashflowSchedule,
}

impl Security {
    /// Creates a security, validating its configuration.
    ///
    /// # Errors
    ///
    /// Returns `SecurityError::InvalidConfig` if the identifier is empty or
    /// the configuration is rejected.
    pub fn new(id: impl Into<String>, kind: SecurityKind) -> SecurityResult<Self> {
        let security = Self {
            id: id.into(),
            kind,
            valuation_date: None,
            cashflows: CashflowSchedule::new(),
        };
        security.setup()?;
        Ok(security)
    }

    /// Creates a security with a schedule computed elsewhere.
    ///
    /// The schedule holds until the next call to
    /// [`schedule_cashflows`](Valuation::schedule_cashflows).
    pub fn with_schedule(
        id: impl Into<String>,
        kind: SecurityKind,
        val_date: Date,
        cashflows: CashflowSchedule,
    ) -> SecurityResult<Self> {
        let mut security = Self::new(id, kind)?;
        security.valuation_date = Some(val_date);
        security.cashflows = cashflows;
        Ok(security)
    }

    /// Security identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Variant and configuration.
    #[must_use]
    pub fn kind(&self) -> &SecurityKind {
        &self.kind
    }

    /// Current valuation date, if scheduled.
    #[must_use]
    pub fn valuation_date(&self) -> Option<Date> {
        self.valuation_date
    }

    /// Current cashflow schedule.
    #[must_use]
    pub fn cashflows(&self) -> &CashflowSchedule {
        &self.cashflows
    }
}

/// Sum of cashflow amounts weighted by `curve` at each offset.
#[must_use]
pub fn discounted_value(cashflows: &CashflowSchedule, curve: &Curve) -> f64 {
    cashflows
        .iter()
        .map(|cf| cf.amount * curve.value_at(cf.offset))
        .sum()
}

impl Valuation for Security {
    fn setup(&self) -> SecurityResult<()> {
        if self.id.trim().is_empty() {
            return Err(SecurityError::invalid_config(&self.id, "empty security id"));
        }
        self.kind
            .model()
            .validate()
            .map_err(|reason| SecurityError::invalid_config(&self.id, reason))
    }

    fn schedule_cashflows(&mut self, val_date: Date) -> SecurityResult<()> {
        let cashflows = self.kind.model().cashflows(val_date)?;
        debug!(
            id = %self.id,
            %val_date,
            flows = cashflows.len(),
            "scheduled cashflows"
        );
        self.cashflows = cashflows;
        self.valuation_date = Some(val_date);
        Ok(())
    }

    fn required_curves(&self) -> Vec<&str> {
        vec![self.kind.model().curve_name()]
    }

    fn npv(&self, curves: &CurveSet) -> SecurityResult<f64> {
        let date = self.valuation_date.ok_or_else(|| SecurityError::NotScheduled {
            id: self.id.clone(),
        })?;
        let name = self.kind.model().curve_name();
        let curve = curves
            .get(name, date)
            .ok_or_else(|| SecurityError::CurveNotFound {
                id: self.id.clone(),
                curve: name.to_string(),
                date,
            })?;
        Ok(discounted_value(&self.cashflows, curve))
    }
}

impl fmt::Display for Security {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.type_name(), self.id)?;
        match &self.kind {
            SecurityKind::Bond(bond) => write!(
                f,
                " (maturity {}, coupon {})",
                bond.maturity, bond.coupon_rate
            ),
            SecurityKind::Equity(equity) => write!(f, " (quantity {})", equity.quantity),
        }
    }
}
