//! The curve type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use rmds_core::Date;
use rmds_math::interpolation::{locate_segment, segment_weight, InterpolationRule, Segment};
use tracing::trace;

use crate::error::{CurveError, CurveResult};
use crate::query::CurveQuery;

/// What a curve's values represent.
///
/// The kind fixes the blend rule used between nodes; it is never inferred
/// from how the curve is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveKind {
    /// Discount factors. Values must be positive; geometric blend.
    DiscountFactor,
    /// Any other series (prices, spreads, rates); linear blend.
    Generic,
}

impl CurveKind {
    /// Returns the blend rule for this kind.
    #[must_use]
    pub fn rule(self) -> InterpolationRule {
        match self {
            CurveKind::DiscountFactor => InterpolationRule::Geometric,
            CurveKind::Generic => InterpolationRule::Linear,
        }
    }
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveKind::DiscountFactor => write!(f, "DF"),
            CurveKind::Generic => write!(f, "GENERIC"),
        }
    }
}

impl FromStr for CurveKind {
    type Err = CurveError;

    /// Parses a curve type tag, case-insensitively.
    ///
    /// `DF`, `DISCOUNT` and `ZERO` select discount factors; `GENERIC`,
    /// `LINEAR` and `SPOT` select a generic series.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DF" | "DISCOUNT" | "ZERO" => Ok(CurveKind::DiscountFactor),
            "GENERIC" | "LINEAR" | "SPOT" => Ok(CurveKind::Generic),
            other => Err(CurveError::invalid_value(format!(
                "unknown curve type '{other}'"
            ))),
        }
    }
}

/// Identity of a curve inside a curve set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CurveKey {
    /// Curve name.
    pub name: String,
    /// As-of date.
    pub as_of: Date,
}

impl CurveKey {
    /// Creates a new key.
    #[must_use]
    pub fn new(name: impl Into<String>, as_of: Date) -> Self {
        Self {
            name: name.into(),
            as_of,
        }
    }
}

impl fmt::Display for CurveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.as_of)
    }
}

/// An ordered `(day offset, value)` series.
///
/// Invariants, checked at construction:
/// - at least two points
/// - strictly increasing offsets
/// - finite values, strictly positive for [`CurveKind::DiscountFactor`]
///
/// Queries at or before the first offset return the first value. Queries
/// past the last offset continue the last segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Curve {
    name: String,
    as_of: Date,
    kind: CurveKind,
    offsets: Vec<i64>,
    values: Vec<f64>,
}

impl Curve {
    /// Creates a curve from parallel offset and value vectors.
    pub fn new(
        name: impl Into<String>,
        as_of: Date,
        kind: CurveKind,
        offsets: Vec<i64>,
        values: Vec<f64>,
    ) -> CurveResult<Self> {
        if offsets.len() != values.len() {
            return Err(CurveError::LengthMismatch {
                offsets: offsets.len(),
                values: values.len(),
            });
        }
        if offsets.len() < 2 {
            return Err(CurveError::insufficient_points(2, offsets.len()));
        }
        if let Some(index) = offsets.windows(2).position(|w| w[1] <= w[0]) {
            return Err(CurveError::NonMonotonicOffsets {
                index: index + 1,
                prev: offsets[index],
                current: offsets[index + 1],
            });
        }
        kind.rule()
            .validate(&values)
            .map_err(|e| CurveError::invalid_value(e.to_string()))?;

        Ok(Self {
            name: name.into(),
            as_of,
            kind,
            offsets,
            values,
        })
    }

    /// Creates a curve from `(offset, value)` pairs.
    pub fn from_points(
        name: impl Into<String>,
        as_of: Date,
        kind: CurveKind,
        points: &[(i64, f64)],
    ) -> CurveResult<Self> {
        let (offsets, values) = points.iter().copied().unzip();
        Self::new(name, as_of, kind, offsets, values)
    }

    /// Curve name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// As-of date.
    #[must_use]
    pub fn as_of(&self) -> Date {
        self.as_of
    }

    /// Curve kind.
    #[must_use]
    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    /// Key under which this curve is stored.
    #[must_use]
    pub fn key(&self) -> CurveKey {
        CurveKey::new(self.name.clone(), self.as_of)
    }

    /// Stored offsets.
    #[must_use]
    pub fn offsets(&self) -> &[i64] {
        &self.offsets
    }

    /// Stored values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterates over the stored `(offset, value)` points.
    pub fn points(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.offsets.iter().copied().zip(self.values.iter().copied())
    }

    /// Number of stored points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Always false for a constructed curve.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Value at a day offset from the as-of date.
    #[must_use]
    pub fn value_at(&self, offset: i64) -> f64 {
        // stored nodes come back bit for bit
        if let Ok(i) = self.offsets.binary_search(&offset) {
            return self.values[i];
        }
        match locate_segment(&self.offsets, &offset) {
            Ok(Segment::Between { lower, upper }) => {
                let t0 = self.offsets[lower] as f64;
                let t1 = self.offsets[upper] as f64;
                let e = segment_weight(offset as f64, t0, t1);
                let value = self
                    .kind
                    .rule()
                    .blend(self.values[lower], self.values[upper], e);
                trace!(curve = %self.name, offset, lower, upper, e, value, "curve lookup");
                value
            }
            // Err only for fewer than two points, which construction rules out
            Ok(Segment::Flat) | Err(_) => self.values[0],
        }
    }

    /// Value at a calendar date, measured in elapsed days from the as-of
    /// date.
    #[must_use]
    pub fn value_at_date(&self, date: &Date) -> f64 {
        self.value_at(self.as_of.day_offset(date))
    }

    /// Value for a parsed query.
    #[must_use]
    pub fn value(&self, query: &CurveQuery) -> f64 {
        match query {
            CurveQuery::Offset(offset) => self.value_at(*offset),
            CurveQuery::Date(date) => self.value_at_date(date),
        }
    }

    /// Builds an independent copy with every value transformed by `f`.
    ///
    /// Offsets, name, date and kind are kept. The result is validated like
    /// any new curve.
    pub fn map_values<F>(&self, f: F) -> CurveResult<Self>
    where
        F: Fn(f64) -> f64,
    {
        let values = self.values.iter().map(|&v| f(v)).collect();
        Self::new(
            self.name.clone(),
            self.as_of,
            self.kind,
            self.offsets.clone(),
            values,
        )
    }
}
