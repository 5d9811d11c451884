//! Domain types.

mod cashflow;
mod date;

pub use cashflow::{Cashflow, CashflowKind, CashflowSchedule};
pub use date::Date;
