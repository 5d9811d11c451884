//! Equity positions.

use serde::{Deserialize, Serialize};

use rmds_core::{Cashflow, CashflowKind, CashflowSchedule, Date};

use crate::error::SecurityResult;
use crate::security::CashflowModel;

/// Equity terms: a quantity marked on a price curve.
///
/// The position is a single holding at offset 0, so its value is
/// `quantity * price(valuation date)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityConfig {
    /// Price curve name (a generic curve).
    pub price_curve: String,
    /// Number of units held.
    pub quantity: f64,
}

impl EquityConfig {
    /// Creates equity terms.
    #[must_use]
    pub fn new(price_curve: impl Into<String>, quantity: f64) -> Self {
        Self {
            price_curve: price_curve.into(),
            quantity,
        }
    }
}

impl CashflowModel for EquityConfig {
    fn validate(&self) -> Result<(), String> {
        if self.price_curve.trim().is_empty() {
            return Err("price curve name is empty".to_string());
        }
        if !self.quantity.is_finite() {
            return Err(format!("quantity {} is not finite", self.quantity));
        }
        Ok(())
    }

    fn cashflows(&self, _val_date: Date) -> SecurityResult<CashflowSchedule> {
        let mut schedule = CashflowSchedule::new();
        schedule.push(Cashflow::new(0, self.quantity, CashflowKind::Holding)?);
        Ok(schedule)
    }

    fn curve_name(&self) -> &str {
        &self.price_curve
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_holding() {
        let config = EquityConfig::new("ACME.PX", 250.0);
        let schedule = config
            .cashflows(Date::from_ymd(2020, 12, 30).unwrap())
            .unwrap();
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.flows()[0].offset, 0);
        assert_eq!(schedule.flows()[0].amount, 250.0);
        assert_eq!(schedule.flows()[0].kind, CashflowKind::Holding);
    }

    #[test]
    fn test_validation() {
        assert!(EquityConfig::new("", 1.0).validate().is_err());
        assert!(EquityConfig::new("ACME.PX", f64::INFINITY).validate().is_err());
        assert!(EquityConfig::new("ACME.PX", -5.0).validate().is_ok());
    }
}
