//! Builder for configuring and constructing a [`FastMap`] engine.

use log::{debug, info};

use crate::core::DistanceMatrix;
use crate::engine::FastMap;
use crate::metric::ObjectSet;
use crate::pivots::PivotStrategy;

/// Configures seed, pivot strategy, and iteration count, then builds an
/// engine over either flavor of distance source.
///
/// Defaults: a freshly drawn random seed (readable back via
/// [`FastMap::seed`] so any run can be replayed), full-scan pivot
/// selection, one furthest-from-furthest round.
pub struct FastMapBuilder {
    seed: u64,
    strategy: PivotStrategy,
    iterations: usize,
}

impl Default for FastMapBuilder {
    fn default() -> Self {
        debug!("creating FastMapBuilder with default parameters");
        Self {
            seed: rand::random(),
            strategy: PivotStrategy::default(),
            iterations: 1,
        }
    }
}

impl FastMapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the RNG seed so pivot selection (and therefore the whole
    /// embedding) is reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        info!("configuring fixed seed {seed}");
        self.seed = seed;
        self
    }

    /// Choose how pivot argmax scans walk the object set.
    pub fn with_pivot_strategy(mut self, strategy: PivotStrategy) -> Self {
        info!("configuring pivot strategy {strategy:?}");
        self.strategy = strategy;
        self
    }

    /// How many furthest-from-furthest rounds to run per axis. One round
    /// already yields good pivots; more rounds trade compute for pivot
    /// quality. Values below 1 are clamped to 1.
    pub fn with_pivot_iterations(mut self, iterations: usize) -> Self {
        info!("configuring pivot iterations {iterations}");
        self.iterations = iterations.max(1);
        self
    }

    /// Builds the matrix-flavor engine, taking ownership of the distances.
    ///
    /// Applies the engine-owned one-shot normalisation: if the largest
    /// entry exceeds 1.0 the whole matrix is rescaled by it, so projection
    /// geometry lives in `[0, 1]` units.
    pub fn build(self, mut dist: DistanceMatrix) -> FastMap<DistanceMatrix> {
        let scale = dist.normalise();
        info!(
            "building matrix engine over {} objects (scale {:.6}, seed {})",
            dist.len(),
            scale,
            self.seed
        );
        FastMap::new(dist, self.seed, self.strategy, self.iterations)
    }

    /// Builds the on-the-fly engine over an object list and a metric.
    ///
    /// Distances are evaluated lazily and memoized per unordered pair; no
    /// global rescale is applied since the full distance range is never
    /// materialized. The metric is a caller contract: symmetric,
    /// non-negative, finite.
    pub fn build_objects<T, F>(self, objects: Vec<T>, metric: F) -> FastMap<ObjectSet<T, F>>
    where
        T: Sync,
        F: Fn(&T, &T) -> f64 + Sync,
    {
        info!(
            "building object engine over {} objects (seed {})",
            objects.len(),
            self.seed
        );
        FastMap::new(
            ObjectSet::new(objects, metric),
            self.seed,
            self.strategy,
            self.iterations,
        )
    }
}
