//! Bisection root-finding algorithm.

use tracing::trace;

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Bisection root-finding algorithm.
///
/// Repeatedly halves the bracket and keeps the half containing the sign
/// change. Requires `f(a) * f(b) <= 0`.
///
/// # Example
///
/// ```rust
/// use rmds_math::solvers::{bisection, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
///
/// let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn bisection<F>(mut f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: FnMut(f64) -> f64,
{
    try_bisection(|x| Ok::<f64, MathError>(f(x)), a, b, config)
}

/// Bisection over an objective that can fail.
///
/// The first error returned by `f` aborts the search and is passed through
/// unchanged. Solver failures (invalid bracket, non-finite objective values,
/// iteration cap) are converted into `E`.
///
/// # Errors
///
/// - `MathError::InvalidBracket` if `f(a)` and `f(b)` share a strict sign
/// - `MathError::InvalidInput` if the objective returns a non-finite value
/// - `MathError::ConvergenceFailed` if the iteration cap is reached
pub fn try_bisection<F, E>(mut f: F, a: f64, b: f64, config: &SolverConfig) -> Result<SolverResult, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<MathError>,
{
    let mut lo = a.min(b);
    let mut hi = a.max(b);

    let mut f_lo = finite(lo, f(lo)?)?;
    let f_hi = finite(hi, f(hi)?)?;

    if f_lo * f_hi > 0.0 {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        }
        .into());
    }

    if f_lo.abs() < config.tolerance {
        return Ok(SolverResult {
            root: lo,
            iterations: 0,
            residual: f_lo,
        });
    }
    if f_hi.abs() < config.tolerance {
        return Ok(SolverResult {
            root: hi,
            iterations: 0,
            residual: f_hi,
        });
    }

    let mut last = f_lo;
    for iteration in 0..config.max_iterations {
        let mid = (lo + hi) / 2.0;
        let f_mid = finite(mid, f(mid)?)?;
        last = f_mid;

        trace!(iteration, lo, hi, mid, f_mid, "bisection step");

        if f_mid.abs() < config.tolerance || (hi - lo) / 2.0 < config.tolerance {
            return Ok(SolverResult {
                root: mid,
                iterations: iteration + 1,
                residual: f_mid,
            });
        }

        if f_mid * f_lo < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }

    Err(MathError::convergence_failed(config.max_iterations, last.abs()).into())
}

fn finite(x: f64, fx: f64) -> MathResult<f64> {
    if fx.is_finite() {
        Ok(fx)
    } else {
        Err(MathError::invalid_input(format!(
            "objective is not finite at x = {x}"
        )))
    }
}
