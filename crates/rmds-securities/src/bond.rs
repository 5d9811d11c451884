//! Fixed-coupon bonds.

use serde::{Deserialize, Serialize};

use rmds_core::{Cashflow, CashflowKind, CashflowSchedule, Date};

use crate::error::SecurityResult;
use crate::security::CashflowModel;

/// Coupon frequencies that divide a year into whole months.
pub const VALID_FREQUENCIES: [u32; 6] = [1, 2, 3, 4, 6, 12];

/// Bond terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondConfig {
    /// Discount curve name.
    pub discount_curve: String,
    /// Final payment date.
    pub maturity: Date,
    /// Annual coupon rate as a decimal (0.05 = 5%).
    pub coupon_rate: f64,
    /// Coupons per year.
    pub frequency: u32,
    /// Redemption amount.
    pub notional: f64,
}

impl BondConfig {
    /// Creates bond terms. Validation happens when the security is built.
    #[must_use]
    pub fn new(
        discount_curve: impl Into<String>,
        maturity: Date,
        coupon_rate: f64,
        frequency: u32,
        notional: f64,
    ) -> Self {
        Self {
            discount_curve: discount_curve.into(),
            maturity,
            coupon_rate,
            frequency,
            notional,
        }
    }

    /// Months between coupon dates.
    #[must_use]
    pub fn period_months(&self) -> u32 {
        12 / self.frequency.max(1)
    }

    /// Coupon amount per period.
    #[must_use]
    pub fn coupon_amount(&self) -> f64 {
        self.notional * self.coupon_rate / f64::from(self.frequency)
    }

    /// Coupon dates after `val_date`, ascending, ending at maturity.
    ///
    /// Dates step back from maturity by whole periods so that month-end
    /// clamping never drifts.
    pub fn coupon_dates(&self, val_date: Date) -> SecurityResult<Vec<Date>> {
        let step = self.period_months() as i32;
        let mut dates = Vec::new();
        let mut k = 0;
        let mut date = self.maturity;
        while date > val_date {
            dates.push(date);
            k += 1;
            date = self.maturity.add_months(-k * step)?;
        }
        dates.reverse();
        Ok(dates)
    }
}

impl CashflowModel for BondConfig {
    fn validate(&self) -> Result<(), String> {
        if self.discount_curve.trim().is_empty() {
            return Err("discount curve name is empty".to_string());
        }
        if !VALID_FREQUENCIES.contains(&self.frequency) {
            return Err(format!(
                "coupon frequency {} must be one of {VALID_FREQUENCIES:?}",
                self.frequency
            ));
        }
        if !self.coupon_rate.is_finite() {
            return Err(format!("coupon rate {} is not finite", self.coupon_rate));
        }
        if !(self.notional.is_finite() && self.notional > 0.0) {
            return Err(format!("notional {} must be positive", self.notional));
        }
        Ok(())
    }

    fn cashflows(&self, val_date: Date) -> SecurityResult<CashflowSchedule> {
        let coupon = self.coupon_amount();
        let dates = self.coupon_dates(val_date)?;
        let mut schedule = CashflowSchedule::new();
        for (i, date) in dates.iter().enumerate() {
            let offset = val_date.day_offset(date);
            let flow = if i + 1 == dates.len() {
                Cashflow::new(offset, coupon + self.notional, CashflowKind::CouponAndPrincipal)?
            } else {
                Cashflow::new(offset, coupon, CashflowKind::Coupon)?
            };
            schedule.push(flow);
        }
        Ok(schedule)
    }

    fn curve_name(&self) -> &str {
        &self.discount_curve
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bond(frequency: u32) -> BondConfig {
        BondConfig::new(
            "OIS.USD",
            Date::from_ymd(2022, 12, 30).unwrap(),
            0.04,
            frequency,
            1000.0,
        )
    }

    #[test]
    fn test_semiannual_schedule() {
        let val = Date::from_ymd(2020, 12, 30).unwrap();
        let schedule = bond(2).cashflows(val).unwrap();

        let offsets: Vec<i64> = schedule.iter().map(|cf| cf.offset).collect();
        let expected: Vec<i64> = ["2021-06-30", "2021-12-30", "2022-06-30", "2022-12-30"]
            .iter()
            .map(|d| val.day_offset(&Date::parse(d).unwrap()))
            .collect();
        assert_eq!(offsets, expected);

        assert_relative_eq!(schedule.flows()[0].amount, 20.0);
        assert_relative_eq!(schedule.flows()[3].amount, 1020.0);
        assert_eq!(schedule.flows()[3].kind, CashflowKind::CouponAndPrincipal);
    }

    #[test]
    fn test_mid_period_valuation() {
        let val = Date::from_ymd(2021, 3, 15).unwrap();
        let schedule = bond(1).cashflows(val).unwrap();
        assert_eq!(schedule.len(), 2);
        assert_eq!(
            schedule.flows()[0].offset,
            val.day_offset(&Date::from_ymd(2021, 12, 30).unwrap())
        );
    }

    #[test]
    fn test_matured_bond_has_no_flows() {
        let val = Date::from_ymd(2022, 12, 30).unwrap();
        assert!(bond(2).cashflows(val).unwrap().is_empty());
        let later = Date::from_ymd(2023, 6, 1).unwrap();
        assert!(bond(2).cashflows(later).unwrap().is_empty());
    }

    #[test]
    fn test_month_end_does_not_drift() {
        let config = BondConfig::new("C", Date::from_ymd(2022, 8, 31).unwrap(), 0.0, 4, 100.0);
        let dates = config
            .coupon_dates(Date::from_ymd(2021, 12, 1).unwrap())
            .unwrap();
        let rendered: Vec<String> = dates.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["2022-02-28", "2022-05-31", "2022-08-31"]);
    }

    #[test]
    fn test_validation() {
        assert!(bond(2).validate().is_ok());
        assert!(bond(5).validate().is_err());
        assert!(bond(0).validate().is_err());

        let mut config = bond(2);
        config.notional = 0.0;
        assert!(config.validate().is_err());

        let mut config = bond(2);
        config.discount_curve = String::new();
        assert!(config.validate().is_err());
    }
}
