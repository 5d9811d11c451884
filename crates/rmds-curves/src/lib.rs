//! # RMDS Curves
//!
//! Curve construction and curve sets for the RMDS valuation service.
//!
//! This crate provides:
//!
//! - **Curve**: an ordered `(day offset, value)` series tagged with a
//!   [`CurveKind`] that selects the blend rule
//! - **Curve sets**: [`CurveSet`] keyed by `(name, as-of date)` and the
//!   loading-time [`CurveRegistry`]
//! - **Bootstrap**: sequential calibration of discount factors from market
//!   instruments, with a repricing report
//! - **Scenarios**: proportional up/down shocks of a whole curve set
//!
//! ## Quick Start
//!
//! ```rust
//! use rmds_core::Date;
//! use rmds_curves::prelude::*;
//!
//! let as_of = Date::from_ymd(2020, 12, 30).unwrap();
//! let curve = Curve::new(
//!     "OIS.USD",
//!     as_of,
//!     CurveKind::DiscountFactor,
//!     vec![0, 90, 180, 360],
//!     vec![1.0, 0.999, 0.997, 0.993],
//! )
//! .unwrap();
//!
//! let df = curve.value_at(150);
//! assert!((df - 0.99767).abs() < 1e-5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_precision_loss)]

pub mod bootstrap;
pub mod curve;
pub mod curve_set;
pub mod error;
pub mod instruments;
pub mod query;
pub mod registry;
pub mod scenario;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::{
        bootstrap_all, BootstrapConfig, BootstrapResult, RepricingCheck, RepricingReport,
        SequentialBootstrapper,
    };
    pub use crate::curve::{Curve, CurveKey, CurveKind};
    pub use crate::curve_set::CurveSet;
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::instruments::{
        Instrument, InstrumentKind, InstrumentPricer, InstrumentSet, StandardPricer,
    };
    pub use crate::query::CurveQuery;
    pub use crate::registry::CurveRegistry;
    pub use crate::scenario::{ScenarioBuilder, ShockSpec};
}

pub use curve::{Curve, CurveKey, CurveKind};
pub use curve_set::CurveSet;
pub use error::{CurveError, CurveResult};
pub use registry::CurveRegistry;
