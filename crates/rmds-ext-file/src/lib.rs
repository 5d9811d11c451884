//! # RMDS Ext File
//!
//! File adapters for the RMDS valuation service.
//!
//! - Curve blocks (CSV, blank-line delimited) into a
//!   [`CurveRegistry`](rmds_curves::CurveRegistry)
//! - Calibration instruments (CSV) grouped per curve for bootstrapping
//! - Securities (TSV) into a [`SecurityRegistry`](rmds_securities::SecurityRegistry)
//! - Scenario and run configuration (JSON)
//! - Result rows (CSV)
//!
//! Loaders skip and report malformed entities; only a file that cannot be
//! opened or read fails the whole load.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]

mod config;
mod curves;
mod error;
mod instruments;
mod output;
mod securities;
mod summary;

pub use config::{load_scenario_definition, RunConfig};
pub use curves::{load_curves, parse_curves, ParsedCurves};
pub use error::{FileError, FileResult};
pub use instruments::{load_instruments, parse_instruments, ParsedInstruments};
pub use output::{write_results, write_results_to};
pub use securities::{load_securities, parse_securities, ParsedSecurities};
pub use summary::{LoadSummary, SkippedItem};
