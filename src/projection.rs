//! The projected-distance recurrence and the cosine-law axis projection.
//!
//! Both halves of the FastMap core live here:
//!
//! - [`projected_distance_sq`]: the squared distance between two objects
//!   once the contributions of previously computed axes are subtracted out.
//!   All subtraction happens in squared-distance space; the square root is
//!   taken only at the single leaf use inside the projection formula.
//! - [`project_axis`]: every object's coordinate on a new axis, given the
//!   two pivots, via the law-of-cosines projection onto the pivot line.
//!
//! The recurrence is written as an explicit loop over the prior axes rather
//! than recursion into enclosing scope state, reading exclusively from
//! columns `0..k` of the coordinate matrix. That makes the per-axis fan-out
//! over objects safe to parallelize: axis `k` is written only after the scan
//! over it completes.

use rayon::prelude::*;

use crate::core::EmbeddingMatrix;
use crate::metric::MetricSource;

/// Squared distance between `x` and `y` with axes `0..k` subtracted out.
///
/// Base value is the raw distance squared; each prior axis removes the
/// squared coordinate gap along it. The result is clamped to 0 before
/// return: floating-point drift and imperfect pivot choices can push the
/// subtraction slightly negative, and that noise is recovered locally so a
/// square root downstream never sees a negative operand.
///
/// O(k) per call; the dominant cost of the whole mapping.
#[inline]
pub fn projected_distance_sq<S: MetricSource>(
    source: &S,
    coords: &EmbeddingMatrix,
    x: usize,
    y: usize,
    k: usize,
) -> f64 {
    let raw = source.raw(x, y);
    let mut d = raw * raw;
    for axis in 0..k {
        let gap = coords.get(x, axis) - coords.get(y, axis);
        d -= gap * gap;
    }
    d.max(0.0)
}

/// Coordinate of every object on the axis defined by pivots `px`, `py`.
///
/// For object `i` the cosine-law projection in squared-distance units is
/// `(d²(i,px) + d²(px,py) − d²(i,py)) / (2·√(d²(px,py)))`, with all three
/// distances taken at level `k`. The caller passes the pivot distance
/// `pivot_dist_sq` precomputed and guarantees it is strictly positive; the
/// degenerate zero case is handled by the driver before this runs.
///
/// Objects are projected in parallel; only columns `0..k` are read.
pub fn project_axis<S: MetricSource>(
    source: &S,
    coords: &EmbeddingMatrix,
    px: usize,
    py: usize,
    pivot_dist_sq: f64,
    k: usize,
) -> Vec<f64> {
    let denom = 2.0 * pivot_dist_sq.sqrt();
    (0..source.len())
        .into_par_iter()
        .map(|i| {
            let dix = projected_distance_sq(source, coords, i, px, k);
            let diy = projected_distance_sq(source, coords, i, py, k);
            (dix + pivot_dist_sq - diy) / denom
        })
        .collect()
}
