//! Sequential bootstrap of discount factor curves.
//!
//! Instruments are solved one at a time in ascending maturity. Each solve
//! appends a trial pillar `(maturity, x)` to the already solved series and
//! searches `x` by bisection until the instrument reprices to its quote.
//! The series starts at `(0, 1.0)`.
//!
//! After the build every instrument is repriced against the final curve
//! and the residuals are returned in a [`RepricingReport`].

use std::fmt;

use rmds_core::Date;
use rmds_math::solvers::{try_bisection, SolverConfig};
use tracing::{debug, info, warn};

use crate::curve::{Curve, CurveKey, CurveKind};
use crate::error::{CurveError, CurveResult};
use crate::instruments::{Instrument, InstrumentPricer, InstrumentSet};

/// Lower end of the discount factor search bracket.
pub const DEFAULT_LOWER_BOUND: f64 = 0.001;

/// Upper end of the discount factor search bracket.
pub const DEFAULT_UPPER_BOUND: f64 = 1.0;

/// Residual tolerance for each pillar solve.
pub const DEFAULT_TOLERANCE: f64 = 1e-12;

/// Maximum number of bisection steps per pillar.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Tolerance for the post-build repricing check.
pub const DEFAULT_REPRICING_TOLERANCE: f64 = 1e-8;

/// Configuration for the sequential bootstrap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BootstrapConfig {
    /// Lower end of the discount factor bracket.
    pub lower_bound: f64,
    /// Upper end of the discount factor bracket.
    pub upper_bound: f64,
    /// Root search settings for each pillar.
    pub solver: SolverConfig,
    /// Maximum repricing error for an instrument to pass.
    pub repricing_tolerance: f64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            lower_bound: DEFAULT_LOWER_BOUND,
            upper_bound: DEFAULT_UPPER_BOUND,
            solver: SolverConfig::new(DEFAULT_TOLERANCE, DEFAULT_MAX_ITERATIONS),
            repricing_tolerance: DEFAULT_REPRICING_TOLERANCE,
        }
    }
}

impl BootstrapConfig {
    /// Sets the discount factor search bracket.
    #[must_use]
    pub fn with_bracket(mut self, lower: f64, upper: f64) -> Self {
        self.lower_bound = lower;
        self.upper_bound = upper;
        self
    }

    /// Sets the residual tolerance of each pillar solve.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.solver.tolerance = tolerance;
        self
    }

    /// Sets the iteration cap of each pillar solve.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.solver.max_iterations = max_iterations;
        self
    }

    /// Sets the repricing tolerance.
    #[must_use]
    pub fn with_repricing_tolerance(mut self, tolerance: f64) -> Self {
        self.repricing_tolerance = tolerance;
        self
    }

    fn validate(&self) -> CurveResult<()> {
        let (lo, hi) = (self.lower_bound, self.upper_bound);
        if !(lo.is_finite() && hi.is_finite() && lo > 0.0 && lo < hi) {
            return Err(CurveError::invalid_value(format!(
                "discount factor bracket [{lo}, {hi}] must satisfy 0 < lower < upper"
            )));
        }
        Ok(())
    }
}

/// Result of repricing one instrument against the built curve.
#[derive(Debug, Clone, PartialEq)]
pub struct RepricingCheck {
    /// Instrument maturity.
    pub maturity: i64,
    /// Instrument label.
    pub description: String,
    /// Market quote.
    pub quote: f64,
    /// Model price on the built curve.
    pub model: f64,
    /// Absolute error `|model - quote|`.
    pub error: f64,
    /// Whether the error is within tolerance.
    pub passed: bool,
}

impl fmt::Display for RepricingCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed { "ok" } else { "FAIL" };
        write!(
            f,
            "{status} {} | model: {:.10} | error: {:.2e}",
            self.description, self.model, self.error
        )
    }
}

/// Repricing residuals for a built curve.
#[derive(Debug, Clone, PartialEq)]
pub struct RepricingReport {
    checks: Vec<RepricingCheck>,
    tolerance: f64,
}

impl RepricingReport {
    /// Builds a report from individual checks.
    #[must_use]
    pub fn new(checks: Vec<RepricingCheck>, tolerance: f64) -> Self {
        Self { checks, tolerance }
    }

    /// Individual checks, in maturity order.
    #[must_use]
    pub fn checks(&self) -> &[RepricingCheck] {
        &self.checks
    }

    /// Largest absolute error.
    #[must_use]
    pub fn max_error(&self) -> f64 {
        self.checks.iter().map(|c| c.error).fold(0.0, f64::max)
    }

    /// Tolerance the checks were judged against.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns true if every instrument repriced within tolerance.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Checks outside tolerance.
    pub fn failed(&self) -> impl Iterator<Item = &RepricingCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

impl fmt::Display for RepricingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Repricing: {}/{} within {:.0e} (max error {:.2e})",
            self.checks.len() - self.failed().count(),
            self.checks.len(),
            self.tolerance,
            self.max_error()
        )?;
        for check in &self.checks {
            writeln!(f, "  {check}")?;
        }
        Ok(())
    }
}

/// A bootstrapped curve with its repricing report.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapResult {
    /// The built curve.
    pub curve: Curve,
    /// Repricing residuals of the input instruments.
    pub report: RepricingReport,
}

impl BootstrapResult {
    /// Returns true if every instrument repriced within tolerance.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.report.is_valid()
    }

    /// Consumes the result, returning the curve.
    #[must_use]
    pub fn into_curve(self) -> Curve {
        self.curve
    }
}

/// Sequential bootstrapper for one discount factor curve.
///
/// # Example
///
/// ```rust
/// use rmds_core::Date;
/// use rmds_curves::bootstrap::SequentialBootstrapper;
/// use rmds_curves::instruments::{Instrument, StandardPricer};
///
/// let as_of = Date::from_ymd(2020, 12, 30).unwrap();
/// let result = SequentialBootstrapper::new("OIS.USD", as_of, StandardPricer)
///     .add_instrument(Instrument::deposit(90, 0.01).unwrap())
///     .add_instrument(Instrument::deposit(180, 0.012).unwrap())
///     .bootstrap()
///     .unwrap();
///
/// assert!(result.is_valid());
/// assert_eq!(result.curve.offsets(), &[0, 90, 180]);
/// ```
pub struct SequentialBootstrapper<P> {
    name: String,
    as_of: Date,
    instruments: Vec<Instrument>,
    pricer: P,
    config: BootstrapConfig,
}

impl<P: InstrumentPricer> SequentialBootstrapper<P> {
    /// Creates a bootstrapper for the curve `name` as of `as_of`.
    pub fn new(name: impl Into<String>, as_of: Date, pricer: P) -> Self {
        Self {
            name: name.into(),
            as_of,
            instruments: Vec::new(),
            pricer,
            config: BootstrapConfig::default(),
        }
    }

    /// Sets the bootstrap configuration.
    #[must_use]
    pub fn with_config(mut self, config: BootstrapConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds an instrument.
    #[must_use]
    pub fn add_instrument(mut self, instrument: Instrument) -> Self {
        self.instruments.push(instrument);
        self
    }

    /// Adds several instruments.
    #[must_use]
    pub fn add_instruments(mut self, instruments: impl IntoIterator<Item = Instrument>) -> Self {
        self.instruments.extend(instruments);
        self
    }

    /// Key of the curve being built.
    #[must_use]
    pub fn key(&self) -> CurveKey {
        CurveKey::new(self.name.clone(), self.as_of)
    }

    /// Builds the curve.
    ///
    /// # Errors
    ///
    /// - `CurveError::InvalidInstrument` if there are no instruments
    /// - `CurveError::DuplicateMaturity` if two instruments share a maturity
    /// - `CurveError::BootstrapFailed` if any pillar cannot be solved; no
    ///   partial curve is returned
    pub fn bootstrap(mut self) -> CurveResult<BootstrapResult> {
        self.config.validate()?;
        if self.instruments.is_empty() {
            return Err(CurveError::invalid_instrument(format!(
                "no instruments provided for {}",
                self.name
            )));
        }

        self.instruments.sort_by_key(Instrument::maturity);
        if let Some(w) = self
            .instruments
            .windows(2)
            .find(|w| w[0].maturity() == w[1].maturity())
        {
            return Err(CurveError::DuplicateMaturity {
                curve: self.name.clone(),
                maturity: w[0].maturity(),
            });
        }

        let mut offsets: Vec<i64> = vec![0];
        let mut values: Vec<f64> = vec![1.0];

        for instrument in &self.instruments {
            let df = self.solve_pillar(instrument, &offsets, &values)?;
            debug!(
                curve = %self.name,
                maturity = instrument.maturity(),
                df,
                "solved pillar"
            );
            offsets.push(instrument.maturity());
            values.push(df);
        }

        let curve = Curve::new(
            self.name.clone(),
            self.as_of,
            CurveKind::DiscountFactor,
            offsets,
            values,
        )?;
        let report = self.reprice(&curve)?;

        if report.is_valid() {
            info!(
                curve = %self.name,
                pillars = curve.len(),
                max_error = report.max_error(),
                "bootstrapped curve"
            );
        } else {
            warn!(
                curve = %self.name,
                failed = report.failed().count(),
                max_error = report.max_error(),
                "bootstrapped curve does not reprice all instruments"
            );
        }

        Ok(BootstrapResult { curve, report })
    }

    fn solve_pillar(
        &self,
        instrument: &Instrument,
        offsets: &[i64],
        values: &[f64],
    ) -> CurveResult<f64> {
        let maturity = instrument.maturity();
        let mut trial_offsets = offsets.to_vec();
        trial_offsets.push(maturity);

        let objective = |x: f64| -> CurveResult<f64> {
            let mut trial_values = values.to_vec();
            trial_values.push(x);
            let trial = Curve::new(
                self.name.clone(),
                self.as_of,
                CurveKind::DiscountFactor,
                trial_offsets.clone(),
                trial_values,
            )?;
            Ok(self.pricer.price(instrument, &trial)? - instrument.quote())
        };

        try_bisection(
            objective,
            self.config.lower_bound,
            self.config.upper_bound,
            &self.config.solver,
        )
        .map(|result| result.root)
        .map_err(|e| CurveError::bootstrap_failed(self.name.clone(), maturity, e.to_string()))
    }

    fn reprice(&self, curve: &Curve) -> CurveResult<RepricingReport> {
        let tolerance = self.config.repricing_tolerance;
        let checks = self
            .instruments
            .iter()
            .map(|instrument| {
                let model = self.pricer.price(instrument, curve)?;
                let error = (model - instrument.quote()).abs();
                Ok(RepricingCheck {
                    maturity: instrument.maturity(),
                    description: instrument.description(),
                    quote: instrument.quote(),
                    model,
                    error,
                    passed: error <= tolerance,
                })
            })
            .collect::<CurveResult<Vec<_>>>()?;
        Ok(RepricingReport::new(checks, tolerance))
    }
}

/// Bootstraps many curves.
///
/// Curves are independent of each other; with the `parallel` feature they
/// are built on rayon's pool. Each set gets its own result, so one failing
/// curve leaves the others intact. Results follow the input order.
pub fn bootstrap_all<P>(
    sets: &[InstrumentSet],
    pricer: &P,
    config: &BootstrapConfig,
) -> Vec<(CurveKey, CurveResult<BootstrapResult>)>
where
    P: InstrumentPricer + Sync,
{
    let build = |set: &InstrumentSet| {
        let set_pricer = |i: &Instrument, c: &Curve| pricer.price(i, c);
        let result = SequentialBootstrapper::new(set.name.clone(), set.as_of, set_pricer)
            .with_config(*config)
            .add_instruments(set.instruments.iter().copied())
            .bootstrap();
        if let Err(e) = &result {
            warn!(curve = %set.key(), error = %e, "curve bootstrap failed");
        }
        (set.key(), result)
    };

    map_sets(sets, build)
}

#[cfg(feature = "parallel")]
fn map_sets<T, F>(sets: &[InstrumentSet], f: F) -> Vec<T>
where
    T: Send,
    F: Fn(&InstrumentSet) -> T + Sync + Send,
{
    use rayon::prelude::*;
    sets.par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
fn map_sets<T, F>(sets: &[InstrumentSet], f: F) -> Vec<T>
where
    F: Fn(&InstrumentSet) -> T,
{
    sets.iter().map(f).collect()
}
