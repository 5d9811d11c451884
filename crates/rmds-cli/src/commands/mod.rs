//! CLI command implementations.

pub mod bootstrap;
pub mod curve;
pub mod run;

pub use bootstrap::BootstrapArgs;
pub use curve::CurveArgs;
pub use run::RunArgs;

use rmds_core::Date;

use crate::error::{CliError, CliResult};

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s.trim()).map_err(|_| CliError::InvalidDate(s.to_string()))
}
