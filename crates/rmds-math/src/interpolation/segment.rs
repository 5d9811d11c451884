//! Segment selection.

use crate::error::{MathError, MathResult};

/// The part of a node series a query falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// At or before the first node: the first value applies unchanged.
    Flat,
    /// Blend between nodes `lower` and `upper = lower + 1`.
    ///
    /// Past the last node this is the last segment, used to extrapolate.
    Between {
        /// Index of the left node.
        lower: usize,
        /// Index of the right node.
        upper: usize,
    },
}

/// Locates the segment for `x` in the strictly increasing series `xs`.
///
/// The insertion index is the smallest `i` with `xs[i] >= x`:
///
/// - `i == 0` gives [`Segment::Flat`]
/// - `i == xs.len()` gives the last segment (extrapolation)
/// - anything else gives the segment `(i - 1, i)`
///
/// # Errors
///
/// Returns `MathError::InsufficientData` for fewer than two nodes.
pub fn locate_segment<T: PartialOrd>(xs: &[T], x: &T) -> MathResult<Segment> {
    let n = xs.len();
    if n < 2 {
        return Err(MathError::insufficient_data(2, n));
    }

    let idx = xs.partition_point(|probe| probe < x);
    let segment = match idx {
        0 => Segment::Flat,
        i if i == n => Segment::Between {
            lower: n - 2,
            upper: n - 1,
        },
        i => Segment::Between {
            lower: i - 1,
            upper: i,
        },
    };
    Ok(segment)
}
