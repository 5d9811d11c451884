//! Type-discriminated attribute records.
//!
//! Definition files deliver securities as flat field maps. A record names
//! its variant in `SecType` and its identifier in `SecId`; the remaining
//! fields are variant specific:
//!
//! | Variant | Fields |
//! |---------|--------|
//! | `Bond` | `DiscountCurve`, `Maturity`, `CpnRate`, `Frequency` (default 1), `Notional` (default 100) |
//! | `Equity` | `PriceCurve`, `Quantity` |

use std::collections::BTreeMap;
use std::str::FromStr;

use rmds_core::Date;

use crate::bond::BondConfig;
use crate::equity::EquityConfig;
use crate::error::{SecurityError, SecurityResult};
use crate::security::{Security, SecurityKind};

/// Type discriminator field.
pub const SEC_TYPE: &str = "SecType";
/// Identifier field.
pub const SEC_ID: &str = "SecId";

const DEFAULT_FREQUENCY: u32 = 1;
const DEFAULT_NOTIONAL: f64 = 100.0;

/// A flat field map describing one security.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityRecord {
    fields: BTreeMap<String, String>,
}

impl SecurityRecord {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    /// Sets a field, trimming the name.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields
            .insert(field.into().trim().to_string(), value.into());
    }

    /// Trimmed field value; empty counts as absent.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Field value that must be present.
    pub fn require(&self, field: &str) -> SecurityResult<&str> {
        self.get(field)
            .ok_or_else(|| SecurityError::missing_field(field))
    }

    /// Parses a required field.
    pub fn parse<T>(&self, field: &str) -> SecurityResult<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.require(field)?;
        raw.parse()
            .map_err(|e: T::Err| SecurityError::invalid_field(field, raw, e.to_string()))
    }

    /// Parses an optional field, falling back to `default` when absent.
    pub fn parse_or<T>(&self, field: &str, default: T) -> SecurityResult<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(field) {
            Some(_) => self.parse(field),
            None => Ok(default),
        }
    }

    /// Security identifier, if present.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.get(SEC_ID)
    }

    /// Builds the security this record describes.
    ///
    /// # Errors
    ///
    /// Construction errors for a missing or unknown `SecType`, missing or
    /// malformed fields, and configurations rejected at setup.
    pub fn to_security(&self) -> SecurityResult<Security> {
        let sec_type = self.require(SEC_TYPE)?;
        let id = self.require(SEC_ID)?;

        let kind = match sec_type.to_ascii_lowercase().as_str() {
            "bond" => SecurityKind::Bond(BondConfig::new(
                self.require("DiscountCurve")?,
                self.parse::<Date>("Maturity")?,
                self.parse("CpnRate")?,
                self.parse_or("Frequency", DEFAULT_FREQUENCY)?,
                self.parse_or("Notional", DEFAULT_NOTIONAL)?,
            )),
            "equity" => SecurityKind::Equity(EquityConfig::new(
                self.require("PriceCurve")?,
                self.parse("Quantity")?,
            )),
            _ => {
                return Err(SecurityError::UnknownType {
                    sec_type: sec_type.to_string(),
                })
            }
        };

        Security::new(id, kind)
    }
}

impl<K, V> FromIterator<(K, V)> for SecurityRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = SecurityRecord::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}
