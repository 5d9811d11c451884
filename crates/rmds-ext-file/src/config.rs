//! Run and scenario configuration files (JSON).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use rmds_core::Date;
use rmds_engine::{ScenarioDefinition, UseCase};

use crate::error::{FileError, FileResult};

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> FileResult<T> {
    let content = fs::read_to_string(path).map_err(|e| FileError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| FileError::json(path, e))
}

/// Loads a scenario definition.
///
/// # Errors
///
/// `FileError::Io` or `FileError::Json`.
pub fn load_scenario_definition(path: impl AsRef<Path>) -> FileResult<ScenarioDefinition> {
    let path = path.as_ref();
    let definition: ScenarioDefinition = read_json(path)?;
    info!(
        file = %path.display(),
        shock = definition.shock_factor,
        risk_factors = definition.risk_factors.len(),
        "scenario definition loaded"
    );
    Ok(definition)
}

/// Everything one run reads and writes.
///
/// ```json
/// {
///   "valuation_date": "2020-12-30",
///   "curve_definition_file": "curves.csv",
///   "instrument_definition_file": "instruments.csv",
///   "scenario_definition_file": "scenarios.json",
///   "security_definition_file": "securities.tsv",
///   "output_file": "results.csv",
///   "use_case": "NPV_CALCULATION"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Run valuation date.
    pub valuation_date: Date,
    /// Curve blocks.
    pub curve_definition_file: PathBuf,
    /// Instruments for curves to bootstrap.
    #[serde(default)]
    pub instrument_definition_file: Option<PathBuf>,
    /// Scenario definition.
    pub scenario_definition_file: PathBuf,
    /// Security rows.
    pub security_definition_file: PathBuf,
    /// Result rows.
    pub output_file: PathBuf,
    /// Computation to run.
    pub use_case: UseCase,
}

impl RunConfig {
    /// Reads a run configuration, resolving relative paths against the
    /// configuration file's directory.
    ///
    /// # Errors
    ///
    /// `FileError::Io` or `FileError::Json`.
    pub fn from_file(path: impl AsRef<Path>) -> FileResult<Self> {
        let path = path.as_ref();
        let config: RunConfig = read_json(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.resolve_against(base))
    }

    /// Rebases every relative path onto `base`.
    #[must_use]
    pub fn resolve_against(mut self, base: &Path) -> Self {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        resolve(&mut self.curve_definition_file);
        if let Some(p) = self.instrument_definition_file.as_mut() {
            resolve(p);
        }
        resolve(&mut self.scenario_definition_file);
        resolve(&mut self.security_definition_file);
        resolve(&mut self.output_file);
        self
    }
}
