//! # RMDS Engine
//!
//! Scenario construction and batch valuation for the RMDS service.
//!
//! A run owns a [`RunContext`]: the curve and security registries filled
//! while loading, and the [`ScenarioSet`] built from a snapshot of the
//! curves. The [`NPV_CALCULATION`](UseCase::NpvCalculation) use case values
//! every (scenario, security) pair against the base, up and down curve sets
//! and collects the rows into a [`ValuationReport`]. Pairs that fail are
//! reported with their error kind and do not stop the batch.
//!
//! ## Example
//!
//! ```rust
//! use rmds_core::Date;
//! use rmds_curves::{Curve, CurveKind};
//! use rmds_engine::prelude::*;
//! use rmds_securities::{EquityConfig, Security, SecurityKind};
//!
//! let date = Date::from_ymd(2020, 12, 30).unwrap();
//! let mut ctx = RunContext::new(date);
//! ctx.curves_mut().add_curve(
//!     Curve::new("ACME.PX", date, CurveKind::Generic, vec![0, 30], vec![50.0, 51.0]).unwrap(),
//! );
//! let equity = SecurityKind::Equity(EquityConfig::new("ACME.PX", 10.0));
//! ctx.securities_mut()
//!     .add_security(Security::new("ACME", equity).unwrap())
//!     .unwrap();
//!
//! ctx.build_scenarios(&ScenarioDefinition::default()).unwrap();
//! let report = ctx.execute(UseCase::NpvCalculation);
//! assert_eq!(report.records[0].npv_base, rust_decimal::Decimal::from(500));
//! ```
//!
//! ## Features
//!
//! - `parallel`: value pairs on the rayon thread pool

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod context;
pub mod error;
pub mod pipeline;
pub mod scenario;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::context::{RunContext, UseCase};
    pub use crate::error::{EngineError, EngineResult};
    pub use crate::pipeline::{value_all, value_pair, PairFailure, ResultRecord, ValuationReport};
    pub use crate::scenario::{
        Scenario, ScenarioDefinition, ScenarioLeg, ScenarioSet, BASE_SCENARIO,
    };
}

pub use context::{RunContext, UseCase};
pub use error::{EngineError, EngineResult};
pub use pipeline::{ResultRecord, ValuationReport};
pub use scenario::{Scenario, ScenarioDefinition, ScenarioSet, BASE_SCENARIO};
