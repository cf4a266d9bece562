//! Pivot selection: the "furthest from furthest" alternation.
//!
//! Each axis is defined by two objects that approximate the most mutually
//! distant pair under the current residual metric. Exact farthest-pair is
//! O(N²); the heuristic starts from a random object and alternates argmax
//! scans between the two sides, which the FastMap literature and the
//! original tuning notes find good enough at one iteration.
//!
//! Two scan strategies exist and are never blended:
//!
//! - [`PivotStrategy::FullScan`] (canonical, default): every argmax scans
//!   all N objects. Deterministic given the RNG seed; ties resolve to the
//!   lowest index via a stable left-to-right `>` comparison.
//! - [`PivotStrategy::Sampled`]: each scan draws `m` random candidates
//!   instead, bounding the per-iteration cost at O(m) for large N at the
//!   price of pivot quality. Still deterministic given the seed, since the
//!   candidates come from the injected RNG.
//!
//! Randomness is always injected by the driver; nothing here touches a
//! process-global generator.

use log::trace;
use rand::Rng;

use crate::core::EmbeddingMatrix;
use crate::metric::MetricSource;
use crate::projection::projected_distance_sq;

/// How the argmax scans inside pivot selection walk the object set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PivotStrategy {
    /// Scan all N objects per argmax. O(N·k) per scan.
    FullScan,
    /// Scan `m` random candidates per argmax. O(m·k) per scan; the drawn
    /// candidate set is what bounds accuracy.
    Sampled(usize),
}

impl Default for PivotStrategy {
    fn default() -> Self {
        PivotStrategy::FullScan
    }
}

/// Picks two pivots approximating the most distant pair under the residual
/// metric at axis `k`.
///
/// Starts from a uniformly random `o1`, then alternates furthest-object
/// scans between the sides for up to `iterations` rounds, stopping early
/// once a side stops moving. Returns `(o1, o2)`; the pair is distinct
/// whenever any residual distance from `o1` is nonzero, and collapses to
/// a repeated index only when the space is already exhausted (which the
/// driver detects through a zero pivot distance).
///
/// # Panics
///
/// Panics if the source is empty.
pub fn pick_pivots<S: MetricSource, R: Rng>(
    source: &S,
    coords: &EmbeddingMatrix,
    k: usize,
    strategy: &PivotStrategy,
    iterations: usize,
    rng: &mut R,
) -> (usize, usize) {
    let n = source.len();
    assert!(n > 0, "cannot pick pivots from an empty object set");

    let mut o1 = rng.random_range(0..n);
    let mut o2 = None;

    for round in 0..iterations.max(1) {
        let cand = furthest(source, coords, o1, k, strategy, rng);
        trace!("round {round}: furthest from {o1} is {cand}");
        if o2 == Some(cand) {
            break;
        }
        o2 = Some(cand);

        let back = furthest(source, coords, cand, k, strategy, rng);
        trace!("round {round}: furthest from {cand} is {back}");
        if back == o1 {
            break;
        }
        o1 = back;
    }

    (o1, o2.unwrap_or(o1))
}

/// Argmax of the residual distance from `from`, per the chosen strategy.
fn furthest<S: MetricSource, R: Rng>(
    source: &S,
    coords: &EmbeddingMatrix,
    from: usize,
    k: usize,
    strategy: &PivotStrategy,
    rng: &mut R,
) -> usize {
    match strategy {
        PivotStrategy::FullScan => furthest_full(source, coords, from, k),
        PivotStrategy::Sampled(m) => furthest_sampled(source, coords, from, k, *m, rng),
    }
}

fn furthest_full<S: MetricSource>(
    source: &S,
    coords: &EmbeddingMatrix,
    from: usize,
    k: usize,
) -> usize {
    let mut best = 0usize;
    let mut best_d = f64::NEG_INFINITY;
    for i in 0..source.len() {
        let d = projected_distance_sq(source, coords, i, from, k);
        // strict `>` keeps the lowest index on ties
        if d > best_d {
            best_d = d;
            best = i;
        }
    }
    best
}

fn furthest_sampled<S: MetricSource, R: Rng>(
    source: &S,
    coords: &EmbeddingMatrix,
    from: usize,
    k: usize,
    m: usize,
    rng: &mut R,
) -> usize {
    let n = source.len();
    let mut best = from;
    let mut best_d = f64::NEG_INFINITY;
    for _ in 0..m.max(1) {
        let i = rng.random_range(0..n);
        let d = projected_distance_sq(source, coords, i, from, k);
        if d > best_d {
            best_d = d;
            best = i;
        }
    }
    best
}
