//! Security registry.

use std::collections::btree_map::{self, BTreeMap};

use rmds_core::Date;
use tracing::{debug, info, warn};

use crate::error::SecurityResult;
use crate::security::{Security, Valuation};

/// Loading-time store of securities for one valuation run, keyed by id.
///
/// When a valuation date is set, every security is kept scheduled for it.
#[derive(Debug, Clone, Default)]
pub struct SecurityRegistry {
    valuation_date: Option<Date>,
    securities: BTreeMap<String, Security>,
}

impl SecurityRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry for a valuation date.
    #[must_use]
    pub fn with_valuation_date(date: Date) -> Self {
        Self {
            valuation_date: Some(date),
            securities: BTreeMap::new(),
        }
    }

    /// Sets the valuation date, rescheduling every security if it changed.
    ///
    /// # Errors
    ///
    /// Returns the first scheduling failure. The registry, its date and
    /// every schedule are then left as they were.
    pub fn set_valuation_date(&mut self, date: Date) -> SecurityResult<()> {
        if self.valuation_date == Some(date) {
            return Ok(());
        }
        info!(%date, securities = self.securities.len(), "rescheduling securities");
        let mut rescheduled = self.securities.clone();
        for security in rescheduled.values_mut() {
            security.schedule_cashflows(date)?;
        }
        self.securities = rescheduled;
        self.valuation_date = Some(date);
        Ok(())
    }

    /// Returns the valuation date, if set.
    #[must_use]
    pub fn valuation_date(&self) -> Option<Date> {
        self.valuation_date
    }

    /// Adds a security, scheduling it for the current valuation date.
    ///
    /// A security with the same id is replaced.
    pub fn add_security(&mut self, mut security: Security) -> SecurityResult<()> {
        if let Some(date) = self.valuation_date {
            security.schedule_cashflows(date)?;
        }
        let id = security.id().to_string();
        if self.securities.insert(id.clone(), security).is_some() {
            warn!(%id, "replaced existing security");
        } else {
            debug!(%id, "added security");
        }
        Ok(())
    }

    /// Looks up a security by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Security> {
        self.securities.get(id)
    }

    /// Securities in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Security> {
        self.securities.values()
    }

    /// Number of securities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.securities.len()
    }

    /// Returns true if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.securities.is_empty()
    }
}

impl<'a> IntoIterator for &'a SecurityRegistry {
    type Item = &'a Security;
    type IntoIter = btree_map::Values<'a, String, Security>;

    fn into_iter(self) -> Self::IntoIter {
        self.securities.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bond::BondConfig;
    use crate::equity::EquityConfig;
    use crate::security::SecurityKind;
    use chrono::NaiveDate;

    fn bond(id: &str) -> Security {
        let config = BondConfig::new("OIS.USD", Date::from_ymd(2022, 12, 30).unwrap(), 0.05, 2, 100.0);
        Security::new(id, SecurityKind::Bond(config)).unwrap()
    }

    #[test]
    fn test_add_schedules_when_dated() {
        let mut registry = SecurityRegistry::new();
        registry.add_security(bond("A")).unwrap();
        assert!(registry.get("A").unwrap().valuation_date().is_none());

        let date = Date::from_ymd(2020, 12, 30).unwrap();
        registry.set_valuation_date(date).unwrap();
        assert_eq!(registry.get("A").unwrap().valuation_date(), Some(date));

        registry.add_security(bond("B")).unwrap();
        assert_eq!(registry.get("B").unwrap().cashflows().len(), 4);
    }

    #[test]
    fn test_date_change_reschedules() {
        let mut registry = SecurityRegistry::new();
        registry
            .set_valuation_date(Date::from_ymd(2020, 12, 30).unwrap())
            .unwrap();
        registry.add_security(bond("A")).unwrap();

        registry
            .set_valuation_date(Date::from_ymd(2021, 12, 30).unwrap())
            .unwrap();
        assert_eq!(registry.get("A").unwrap().cashflows().len(), 2);
    }

    #[test]
    fn test_failed_reschedule_leaves_registry_unchanged() {
        let start = Date::from_ymd(2020, 12, 30).unwrap();
        let earliest = Date::from(NaiveDate::MIN);
        // stepping back a year from here runs off the calendar
        let early_maturity = earliest.add_months(1).unwrap();

        let mut registry = SecurityRegistry::with_valuation_date(start);
        let equity = EquityConfig::new("ACME.PX", 10.0);
        registry
            .add_security(Security::new("A", SecurityKind::Equity(equity)).unwrap())
            .unwrap();
        let early = BondConfig::new("OIS.USD", early_maturity, 0.05, 1, 100.0);
        registry
            .add_security(Security::new("Z", SecurityKind::Bond(early)).unwrap())
            .unwrap();

        assert!(registry.set_valuation_date(earliest).is_err());
        assert_eq!(registry.valuation_date(), Some(start));
        assert_eq!(registry.get("A").unwrap().valuation_date(), Some(start));
        assert_eq!(registry.get("Z").unwrap().valuation_date(), Some(start));

        // the same date is attempted again rather than skipped
        assert!(registry.set_valuation_date(earliest).is_err());

        let later = Date::from_ymd(2021, 6, 30).unwrap();
        registry.set_valuation_date(later).unwrap();
        assert_eq!(registry.get("A").unwrap().valuation_date(), Some(later));
        assert_eq!(registry.get("Z").unwrap().valuation_date(), Some(later));
    }

    #[test]
    fn test_replace_same_id() {
        let mut registry = SecurityRegistry::new();
        registry.add_security(bond("A")).unwrap();
        registry.add_security(bond("A")).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.iter().count(), 1);
    }
}
