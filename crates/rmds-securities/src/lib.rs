//! # RMDS Securities
//!
//! Securities valued by the RMDS service.
//!
//! - **Variants**: [`Bond`](SecurityKind::Bond) and
//!   [`Equity`](SecurityKind::Equity), each with a typed configuration
//!   validated at construction
//! - **Valuation**: the [`Valuation`] capability (`setup`,
//!   `schedule_cashflows`, `required_curves`, `npv`)
//! - **Records**: construction from type-discriminated attribute records
//! - **Registry**: [`SecurityRegistry`], rescheduling on valuation date
//!   changes
//!
//! ## Example
//!
//! ```rust
//! use rmds_core::Date;
//! use rmds_securities::prelude::*;
//!
//! let maturity = Date::from_ymd(2025, 12, 30).unwrap();
//! let bond = BondConfig::new("OIS.USD", maturity, 0.05, 2, 100.0);
//! let mut security = Security::new("BOND1", SecurityKind::Bond(bond)).unwrap();
//!
//! security.schedule_cashflows(Date::from_ymd(2020, 12, 30).unwrap()).unwrap();
//! assert_eq!(security.cashflows().len(), 10);
//! assert_eq!(security.required_curves(), vec!["OIS.USD"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_wrap)]

pub mod bond;
pub mod equity;
pub mod error;
pub mod record;
pub mod registry;
pub mod security;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bond::BondConfig;
    pub use crate::equity::EquityConfig;
    pub use crate::error::{SecurityError, SecurityResult};
    pub use crate::record::SecurityRecord;
    pub use crate::registry::SecurityRegistry;
    pub use crate::security::{CashflowModel, Security, SecurityKind, Valuation};
}

pub use bond::BondConfig;
pub use equity::EquityConfig;
pub use error::{SecurityError, SecurityResult};
pub use record::SecurityRecord;
pub use registry::SecurityRegistry;
pub use security::{Security, SecurityKind, Valuation};
