//! The mapping driver: one axis at a time, pivots then projection.
//!
//! [`FastMap`] owns a [`MetricSource`] plus the pivot configuration and
//! turns a target dimensionality K into an [`Embedding`]. Each `map(k)`
//! call is synchronous and atomic from the caller's perspective: fresh
//! coordinate and pivot matrices are allocated at entry, filled column by
//! column, and handed back at exit. No partial state survives between
//! calls apart from the raw-distance memo an [`ObjectSet`] source keeps.
//!
//! [`ObjectSet`]: crate::metric::ObjectSet

use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::{EmbeddingMatrix, PivotPairs};
use crate::metric::MetricSource;
use crate::pivots::{pick_pivots, PivotStrategy};
use crate::projection::{project_axis, projected_distance_sq};

/// Squared pivot distance at or below which an axis is degenerate.
///
/// A residual this small means the space is exhausted along every remaining
/// direction the heuristic can find; projecting onto it would divide by a
/// near-zero pivot distance and amplify floating-point noise into the
/// coordinates.
pub const DEGENERACY_EPS: f64 = 1e-12;

/// The result of one `map(k)` call: coordinates plus pivot diagnostics.
#[derive(Clone, Debug)]
pub struct Embedding {
    /// N×K coordinates, row `i` for input object `i`. Columns beyond a
    /// degenerate exit are all 0.
    pub coords: EmbeddingMatrix,
    /// Which object pair defined each computed axis.
    pub pivots: PivotPairs,
}

/// The FastMap projection engine over a distance source.
///
/// Construct through [`FastMapBuilder`](crate::builder::FastMapBuilder);
/// call [`map`](FastMap::map) once per requested embedding. The engine is
/// immutable during `map`, so a shared reference can serve sequential calls
/// freely; each call produces its own matrices.
///
/// # Examples
///
/// ```
/// use fastmap::builder::FastMapBuilder;
/// use fastmap::core::DistanceMatrix;
///
/// let dist = DistanceMatrix::from_rows(vec![
///     vec![0.0, 3.0, 4.0],
///     vec![3.0, 0.0, 5.0],
///     vec![4.0, 5.0, 0.0],
/// ]).unwrap();
///
/// let engine = FastMapBuilder::new().with_seed(42).build(dist);
/// let embedding = engine.map(2);
/// assert_eq!(embedding.coords.shape(), (3, 2));
/// ```
pub struct FastMap<S: MetricSource> {
    source: S,
    seed: u64,
    strategy: PivotStrategy,
    iterations: usize,
}

impl<S: MetricSource> FastMap<S> {
    pub(crate) fn new(source: S, seed: u64, strategy: PivotStrategy, iterations: usize) -> Self {
        Self {
            source,
            seed,
            strategy,
            iterations,
        }
    }

    /// The distance source this engine projects from.
    #[inline]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The RNG seed pivot selection runs under; record it to replay a run.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Consumes the engine, returning the source.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Computes a K-dimensional embedding of all N objects.
    ///
    /// Iterates the axis loop up to `k` times: pick pivots under the
    /// residual metric, bail out if their projected distance is degenerate,
    /// otherwise fill the axis column for every object and move on. The
    /// zero-initialized coordinate matrix makes the degenerate exit a plain
    /// `break`: untouched columns already hold the defined value 0.
    ///
    /// `map(0)` returns an N×0 embedding without selecting any pivots, and
    /// an empty source yields a 0×K embedding. Repeated calls with the same
    /// source and seed produce identical pivots and coordinates.
    pub fn map(&self, k: usize) -> Embedding {
        let n = self.source.len();
        info!("mapping {n} objects into {k} dimensions (seed {})", self.seed);

        let mut coords = EmbeddingMatrix::zeros(n, k);
        let mut pivots = PivotPairs::new(k);
        if n == 0 || k == 0 {
            return Embedding { coords, pivots };
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        for axis in 0..k {
            let (px, py) = pick_pivots(
                &self.source,
                &coords,
                axis,
                &self.strategy,
                self.iterations,
                &mut rng,
            );
            let dxy = projected_distance_sq(&self.source, &coords, px, py, axis);
            debug!("axis {axis}: pivots ({px}, {py}), residual d² = {dxy:.6e}");

            if dxy <= DEGENERACY_EPS {
                debug!("axis {axis}: degenerate pivot distance, remaining axes stay 0");
                break;
            }
            pivots.set(axis, px, py);

            let column = project_axis(&self.source, &coords, px, py, dxy, axis);
            for (i, v) in column.into_iter().enumerate() {
                coords.set(i, axis, v);
            }
        }

        Embedding { coords, pivots }
    }
}
