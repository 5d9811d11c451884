//! Piecewise interpolation primitives.
//!
//! Curves in this workspace interpolate node by node: a segment is located
//! by binary search, then one of two blend rules is applied inside it.
//!
//! | Rule | Formula | Typical values |
//! |------|---------|----------------|
//! | [`InterpolationRule::Linear`] | `v0 + (v1 - v0) * e` | rates, prices |
//! | [`InterpolationRule::Geometric`] | `v0 * (v1 / v0)^e` | discount factors |
//!
//! where `e = (x - x0) / (x1 - x0)`. Both rules share the same segment
//! selection (see [`locate_segment`]), so extrapolation beyond the last node
//! continues the last segment and anything at or before the first node is
//! flat.

mod rule;
mod segment;

pub use rule::InterpolationRule;
pub use segment::{locate_segment, Segment};

/// Position of `x` inside `[x0, x1]` as a fraction of the segment width.
///
/// Values outside `[0, 1]` mean extrapolation.
#[must_use]
pub fn segment_weight(x: f64, x0: f64, x1: f64) -> f64 {
    (x - x0) / (x1 - x0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_segment_weight() {
        assert_relative_eq!(segment_weight(5.0, 0.0, 10.0), 0.5);
        assert_relative_eq!(segment_weight(15.0, 0.0, 10.0), 1.5);
        assert_relative_eq!(segment_weight(0.0, 0.0, 10.0), 0.0);
    }
}
