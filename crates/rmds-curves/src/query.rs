//! Dynamically typed curve queries.
//!
//! Queries arriving from text (command line, definition files) or JSON are
//! either an integer day offset or an ISO date. Anything else is a
//! [`CurveError::TypeMismatch`].

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use rmds_core::Date;

use crate::error::{CurveError, CurveResult};

/// A point on a curve, addressed by offset or by date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveQuery {
    /// Elapsed days from the curve's as-of date.
    Offset(i64),
    /// Calendar date.
    Date(Date),
}

impl CurveQuery {
    /// Interprets a JSON value as a query.
    ///
    /// Integers are offsets; strings are parsed as in [`FromStr`].
    pub fn from_json(value: &Value) -> CurveResult<Self> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .map(CurveQuery::Offset)
                .ok_or_else(|| CurveError::type_mismatch(n.to_string())),
            Value::String(s) => s.parse(),
            other => Err(CurveError::type_mismatch(other.to_string())),
        }
    }
}

impl FromStr for CurveQuery {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(offset) = s.parse::<i64>() {
            return Ok(CurveQuery::Offset(offset));
        }
        Date::parse(s)
            .map(CurveQuery::Date)
            .map_err(|_| CurveError::type_mismatch(format!("'{s}'")))
    }
}

impl From<i64> for CurveQuery {
    fn from(offset: i64) -> Self {
        CurveQuery::Offset(offset)
    }
}

impl From<Date> for CurveQuery {
    fn from(date: Date) -> Self {
        CurveQuery::Date(date)
    }
}

impl fmt::Display for CurveQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveQuery::Offset(offset) => write!(f, "{offset}"),
            CurveQuery::Date(date) => write!(f, "{date}"),
        }
    }
}
