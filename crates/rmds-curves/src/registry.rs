//! Curve registry.

use tracing::{debug, info};

use rmds_core::Date;

use crate::curve::Curve;
use crate::curve_set::CurveSet;

/// Loading-time store of curves for one valuation run.
///
/// Owned by the run context and mutated only while definitions are loaded.
/// Valuation works on a [`snapshot`](CurveRegistry::snapshot), never on the
/// registry itself.
#[derive(Debug, Clone, Default)]
pub struct CurveRegistry {
    valuation_date: Option<Date>,
    curves: CurveSet,
}

impl CurveRegistry {
    /// Creates an empty registry with no valuation date.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry for a valuation date.
    #[must_use]
    pub fn with_valuation_date(date: Date) -> Self {
        Self {
            valuation_date: Some(date),
            curves: CurveSet::new(),
        }
    }

    /// Sets the valuation date.
    pub fn set_valuation_date(&mut self, date: Date) {
        info!(%date, "curve registry valuation date set");
        self.valuation_date = Some(date);
    }

    /// Returns the valuation date, if set.
    #[must_use]
    pub fn valuation_date(&self) -> Option<Date> {
        self.valuation_date
    }

    /// Adds a curve. A curve already stored under the same key is replaced.
    pub fn add_curve(&mut self, curve: Curve) {
        let key = curve.key();
        if self.curves.insert(curve).is_some() {
            debug!(%key, "replaced existing curve");
        } else {
            debug!(%key, "added curve");
        }
    }

    /// Looks up a curve. A miss is `None`, not an error.
    #[must_use]
    pub fn get_curve(&self, name: &str, date: Date) -> Option<&Curve> {
        self.curves.get(name, date)
    }

    /// Copies the current contents into an independent curve set.
    #[must_use]
    pub fn snapshot(&self) -> CurveSet {
        self.curves.clone()
    }

    /// Curves currently stored.
    #[must_use]
    pub fn curves(&self) -> &CurveSet {
        &self.curves
    }

    /// Number of stored curves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}
