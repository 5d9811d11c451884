//! Cashflow records and schedules.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Type of cashflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CashflowKind {
    /// Regular coupon payment
    Coupon,
    /// Principal repayment at maturity
    Principal,
    /// Combined coupon and principal (final payment)
    CouponAndPrincipal,
    /// Position held at the valuation date (equity units)
    Holding,
}

impl fmt::Display for CashflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CashflowKind::Coupon => "Coupon",
            CashflowKind::Principal => "Principal",
            CashflowKind::CouponAndPrincipal => "Coupon+Principal",
            CashflowKind::Holding => "Holding",
        };
        write!(f, "{name}")
    }
}

/// A single scheduled cashflow.
///
/// The offset is the number of elapsed days from the valuation date the
/// schedule was built for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cashflow {
    /// Day offset from the valuation date
    pub offset: i64,
    /// Amount paid
    pub amount: f64,
    /// Type of cashflow
    pub kind: CashflowKind,
}

impl Cashflow {
    /// Creates a new cashflow.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidCashflow` if the amount is not finite.
    pub fn new(offset: i64, amount: f64, kind: CashflowKind) -> CoreResult<Self> {
        if !amount.is_finite() {
            return Err(CoreError::invalid_cashflow(format!(
                "amount {amount} at offset {offset} is not finite"
            )));
        }
        Ok(Self {
            offset,
            amount,
            kind,
        })
    }
}

/// An ordered cashflow schedule.
///
/// Cashflows are kept sorted by offset; pushing keeps the ordering stable
/// for flows sharing an offset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashflowSchedule {
    flows: Vec<Cashflow>,
}

impl CashflowSchedule {
    /// Creates an empty schedule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a schedule from `(offset, amount)` pairs.
    ///
    /// All flows are tagged [`CashflowKind::Coupon`] except the last one,
    /// which is tagged [`CashflowKind::CouponAndPrincipal`].
    pub fn from_pairs(pairs: &[(i64, f64)]) -> CoreResult<Self> {
        let mut schedule = Self::new();
        for (i, &(offset, amount)) in pairs.iter().enumerate() {
            let kind = if i + 1 == pairs.len() {
                CashflowKind::CouponAndPrincipal
            } else {
                CashflowKind::Coupon
            };
            schedule.push(Cashflow::new(offset, amount, kind)?);
        }
        Ok(schedule)
    }

    /// Adds a cashflow, keeping offsets ordered.
    pub fn push(&mut self, flow: Cashflow) {
        let idx = self.flows.partition_point(|f| f.offset <= flow.offset);
        self.flows.insert(idx, flow);
    }

    /// Returns the scheduled cashflows.
    #[must_use]
    pub fn flows(&self) -> &[Cashflow] {
        &self.flows
    }

    /// Iterates over the cashflows in offset order.
    pub fn iter(&self) -> impl Iterator<Item = &Cashflow> {
        self.flows.iter()
    }

    /// Number of cashflows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    /// Returns true if nothing is scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Sum of undiscounted amounts.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.flows.iter().map(|f| f.amount).sum()
    }
}

impl<'a> IntoIterator for &'a CashflowSchedule {
    type Item = &'a Cashflow;
    type IntoIter = std::slice::Iter<'a, Cashflow>;

    fn into_iter(self) -> Self::IntoIter {
        self.flows.iter()
    }
}
