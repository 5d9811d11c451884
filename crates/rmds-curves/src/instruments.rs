//! Calibration instruments and their pricing.
//!
//! An [`Instrument`] is a market quote at a maturity. Pricing is supplied
//! separately through [`InstrumentPricer`], so curve construction never
//! depends on any particular security implementation. [`StandardPricer`]
//! covers deposits, zero-coupon bonds and par swaps under the elapsed-day
//! convention with a 365-day year.

use serde::{Deserialize, Serialize};
use std::fmt;

use rmds_core::Date;

use crate::curve::{Curve, CurveKey};
use crate::error::{CurveError, CurveResult};

/// Days per year for accrual fractions.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Instrument type with its per-type terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InstrumentKind {
    /// Money-market deposit quoted as a simple annual rate.
    Deposit,
    /// Zero-coupon bond quoted as a price.
    ZeroCouponBond {
        /// Redemption amount.
        face: f64,
    },
    /// Fixed-for-floating swap quoted as a par rate.
    ParSwap {
        /// Length of a fixed period in days.
        period_days: i64,
    },
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstrumentKind::Deposit => write!(f, "Deposit"),
            InstrumentKind::ZeroCouponBond { face } => write!(f, "ZeroCouponBond(face={face})"),
            InstrumentKind::ParSwap { period_days } => write!(f, "ParSwap({period_days}d)"),
        }
    }
}

/// A market-quoted calibration instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    maturity: i64,
    quote: f64,
    kind: InstrumentKind,
}

impl Instrument {
    /// Creates an instrument.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidInstrument` if the maturity is not
    /// positive, the quote is not finite, or the per-type terms are invalid.
    pub fn new(maturity: i64, quote: f64, kind: InstrumentKind) -> CurveResult<Self> {
        if maturity <= 0 {
            return Err(CurveError::invalid_instrument(format!(
                "maturity must be a positive day offset, got {maturity}"
            )));
        }
        if !quote.is_finite() {
            return Err(CurveError::invalid_instrument(format!(
                "quote at maturity {maturity} is not finite"
            )));
        }
        match kind {
            InstrumentKind::ZeroCouponBond { face } if !(face.is_finite() && face > 0.0) => {
                return Err(CurveError::invalid_instrument(format!(
                    "zero-coupon face must be positive, got {face}"
                )));
            }
            InstrumentKind::ParSwap { period_days } if period_days <= 0 => {
                return Err(CurveError::invalid_instrument(format!(
                    "swap period must be positive, got {period_days} days"
                )));
            }
            _ => {}
        }
        Ok(Self {
            maturity,
            quote,
            kind,
        })
    }

    /// Deposit quoted as a simple annual rate.
    pub fn deposit(maturity: i64, rate: f64) -> CurveResult<Self> {
        Self::new(maturity, rate, InstrumentKind::Deposit)
    }

    /// Zero-coupon bond quoted as a price per `face`.
    pub fn zero_coupon(maturity: i64, price: f64, face: f64) -> CurveResult<Self> {
        Self::new(maturity, price, InstrumentKind::ZeroCouponBond { face })
    }

    /// Par swap quoted as a fixed rate.
    pub fn par_swap(maturity: i64, rate: f64, period_days: i64) -> CurveResult<Self> {
        Self::new(maturity, rate, InstrumentKind::ParSwap { period_days })
    }

    /// Maturity as a day offset from the curve's as-of date.
    #[must_use]
    pub fn maturity(&self) -> i64 {
        self.maturity
    }

    /// Market quote.
    #[must_use]
    pub fn quote(&self) -> f64 {
        self.quote
    }

    /// Instrument type and terms.
    #[must_use]
    pub fn kind(&self) -> InstrumentKind {
        self.kind
    }

    /// Short human-readable label.
    #[must_use]
    pub fn description(&self) -> String {
        format!("{} {}d @ {}", self.kind, self.maturity, self.quote)
    }
}

/// Instruments for one curve to be bootstrapped.
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentSet {
    /// Target curve name.
    pub name: String,
    /// Target curve as-of date.
    pub as_of: Date,
    /// Instruments, in any order.
    pub instruments: Vec<Instrument>,
}

impl InstrumentSet {
    /// Creates an empty set for a curve.
    #[must_use]
    pub fn new(name: impl Into<String>, as_of: Date) -> Self {
        Self {
            name: name.into(),
            as_of,
            instruments: Vec::new(),
        }
    }

    /// Key of the curve this set builds.
    #[must_use]
    pub fn key(&self) -> CurveKey {
        CurveKey::new(self.name.clone(), self.as_of)
    }

    /// Adds an instrument.
    #[must_use]
    pub fn with_instrument(mut self, instrument: Instrument) -> Self {
        self.instruments.push(instrument);
        self
    }
}

/// Prices an instrument off a trial curve.
///
/// Implemented by [`StandardPricer`] and by any closure
/// `Fn(&Instrument, &Curve) -> CurveResult<f64>`.
pub trait InstrumentPricer {
    /// Model value of `instrument` on `curve`, in the units of its quote.
    fn price(&self, instrument: &Instrument, curve: &Curve) -> CurveResult<f64>;
}

impl<F> InstrumentPricer for F
where
    F: Fn(&Instrument, &Curve) -> CurveResult<f64>,
{
    fn price(&self, instrument: &Instrument, curve: &Curve) -> CurveResult<f64> {
        self(instrument, curve)
    }
}

/// Default pricer for the built-in instrument kinds.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPricer;

impl StandardPricer {
    /// Fixed payment offsets of a swap: every `period_days` up to the
    /// maturity, with a short final period if needed.
    #[must_use]
    pub fn swap_schedule(maturity: i64, period_days: i64) -> Vec<i64> {
        let mut offsets = Vec::new();
        let mut t = period_days;
        while t < maturity {
            offsets.push(t);
            t += period_days;
        }
        offsets.push(maturity);
        offsets
    }
}

impl InstrumentPricer for StandardPricer {
    fn price(&self, instrument: &Instrument, curve: &Curve) -> CurveResult<f64> {
        let maturity = instrument.maturity();
        let df = curve.value_at(maturity);
        match instrument.kind() {
            InstrumentKind::Deposit => {
                let tau = maturity as f64 / DAYS_PER_YEAR;
                Ok((1.0 / df - 1.0) / tau)
            }
            InstrumentKind::ZeroCouponBond { face } => Ok(face * df),
            InstrumentKind::ParSwap { period_days } => {
                let mut annuity = 0.0;
                let mut prev = 0;
                for t in Self::swap_schedule(maturity, period_days) {
                    annuity += (t - prev) as f64 / DAYS_PER_YEAR * curve.value_at(t);
                    prev = t;
                }
                if annuity <= 0.0 {
                    return Err(CurveError::invalid_value(format!(
                        "non-positive annuity {annuity} for {}",
                        instrument.description()
                    )));
                }
                Ok((1.0 - df) / annuity)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::CurveKind;
    use approx::assert_relative_eq;

    fn flat_curve(df_1y: f64) -> Curve {
        Curve::new(
            "T",
            Date::from_ymd(2020, 12, 30).unwrap(),
            CurveKind::DiscountFactor,
            vec![0, 365],
            vec![1.0, df_1y],
        )
        .unwrap()
    }

    #[test]
    fn test_instrument_validation() {
        assert!(Instrument::deposit(0, 0.01).is_err());
        assert!(Instrument::deposit(-30, 0.01).is_err());
        assert!(Instrument::deposit(30, f64::NAN).is_err());
        assert!(Instrument::zero_coupon(365, 95.0, 0.0).is_err());
        assert!(Instrument::par_swap(730, 0.02, 0).is_err());
        assert!(Instrument::par_swap(730, 0.02, 182).is_ok());
    }

    #[test]
    fn test_deposit_price() {
        let curve = flat_curve(1.0 / 1.05);
        let deposit = Instrument::deposit(365, 0.05).unwrap();
        assert_relative_eq!(StandardPricer.price(&deposit, &curve).unwrap(), 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_coupon_price() {
        let curve = flat_curve(0.95);
        let zcb = Instrument::zero_coupon(365, 95.0, 100.0).unwrap();
        assert_relative_eq!(StandardPricer.price(&zcb, &curve).unwrap(), 95.0, epsilon = 1e-12);
    }

    #[test]
    fn test_swap_schedule() {
        assert_eq!(StandardPricer::swap_schedule(730, 365), vec![365, 730]);
        assert_eq!(StandardPricer::swap_schedule(400, 365), vec![365, 400]);
        assert_eq!(StandardPricer::swap_schedule(100, 365), vec![100]);
    }

    #[test]
    fn test_single_period_swap_matches_deposit() {
        let curve = flat_curve(0.96);
        let swap = Instrument::par_swap(365, 0.0, 365).unwrap();
        let deposit = Instrument::deposit(365, 0.0).unwrap();
        assert_relative_eq!(
            StandardPricer.price(&swap, &curve).unwrap(),
            StandardPricer.price(&deposit, &curve).unwrap(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_closure_pricer() {
        let curve = flat_curve(0.96);
        let pricer = |inst: &Instrument, c: &Curve| Ok::<f64, CurveError>(c.value_at(inst.maturity()));
        let zcb = Instrument::zero_coupon(365, 0.96, 1.0).unwrap();
        assert_relative_eq!(pricer.price(&zcb, &curve).unwrap(), 0.96);
    }
}
