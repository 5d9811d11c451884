//! Keyed curve collections.

use std::collections::btree_map::{self, BTreeMap};

use rmds_core::Date;

use crate::curve::{Curve, CurveKey};
use crate::error::{CurveError, CurveResult};

/// A set of curves keyed by `(name, as-of date)`.
///
/// Iteration follows key order, so anything derived from a set (scenario
/// shocks, reports) is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurveSet {
    curves: BTreeMap<CurveKey, Curve>,
}

impl CurveSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a curve under its own key, returning the curve it replaced.
    pub fn insert(&mut self, curve: Curve) -> Option<Curve> {
        self.curves.insert(curve.key(), curve)
    }

    /// Looks up a curve by name and date.
    #[must_use]
    pub fn get(&self, name: &str, as_of: Date) -> Option<&Curve> {
        // BTreeMap lookups need an owned key
        self.curves.get(&CurveKey::new(name, as_of))
    }

    /// Looks up a curve by key.
    #[must_use]
    pub fn get_key(&self, key: &CurveKey) -> Option<&Curve> {
        self.curves.get(key)
    }

    /// Looks up a curve that must be present.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::CurveNotFound` on a miss.
    pub fn require(&self, name: &str, as_of: Date) -> CurveResult<&Curve> {
        self.get(name, as_of)
            .ok_or_else(|| CurveError::curve_not_found(name, as_of))
    }

    /// Returns true if a curve is stored under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &CurveKey) -> bool {
        self.curves.contains_key(key)
    }

    /// Keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &CurveKey> {
        self.curves.keys()
    }

    /// Curves in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&CurveKey, &Curve)> {
        self.curves.iter()
    }

    /// Curves in key order, without keys.
    pub fn curves(&self) -> impl Iterator<Item = &Curve> {
        self.curves.values()
    }

    /// Number of curves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}

impl FromIterator<Curve> for CurveSet {
    fn from_iter<I: IntoIterator<Item = Curve>>(iter: I) -> Self {
        let mut set = CurveSet::new();
        for curve in iter {
            set.insert(curve);
        }
        set
    }
}

impl Extend<Curve> for CurveSet {
    fn extend<I: IntoIterator<Item = Curve>>(&mut self, iter: I) {
        for curve in iter {
            self.insert(curve);
        }
    }
}

impl IntoIterator for CurveSet {
    type Item = (CurveKey, Curve);
    type IntoIter = btree_map::IntoIter<CurveKey, Curve>;

    fn into_iter(self) -> Self::IntoIter {
        self.curves.into_iter()
    }
}

impl<'a> IntoIterator for &'a CurveSet {
    type Item = (&'a CurveKey, &'a Curve);
    type IntoIter = btree_map::Iter<'a, CurveKey, Curve>;

    fn into_iter(self) -> Self::IntoIter {
        self.curves.iter()
    }
}
