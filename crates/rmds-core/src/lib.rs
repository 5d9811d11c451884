//! # RMDS Core
//!
//! Core types shared by every crate in the RMDS workspace.
//!
//! - **Types**: [`Date`] with the elapsed-day offset convention, cashflow
//!   records and schedules
//! - **Errors**: the cross-crate [`ErrorKind`] taxonomy used to classify
//!   construction, lookup, convergence and type-mismatch failures
//!
//! ## Example
//!
//! ```rust
//! use rmds_core::prelude::*;
//!
//! let as_of = Date::from_ymd(2020, 12, 30).unwrap();
//! let pay = Date::from_ymd(2021, 3, 30).unwrap();
//! assert_eq!(as_of.day_offset(&pay), 90);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult, ErrorKind};
    pub use crate::types::{Cashflow, CashflowKind, CashflowSchedule, Date};
}

pub use error::{CoreError, CoreResult, ErrorKind};
pub use types::{Cashflow, CashflowKind, CashflowSchedule, Date};
