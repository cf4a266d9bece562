//! Distance sources: the seam between the matrix and on-the-fly engines.
//!
//! [`MetricSource`] abstracts "give me the raw (axis-0) distance between
//! objects x and y". The matrix flavor answers from a precomputed
//! [`DistanceMatrix`] lookup; the object-list flavor ([`ObjectSet`])
//! evaluates a caller-supplied metric lazily and memoizes every pair it has
//! seen, since the projection scans re-query the same pairs at every axis
//! and metrics like edit distance are far more expensive than a lookup.

use dashmap::DashMap;
use log::debug;

use crate::core::DistanceMatrix;

/// A source of raw pairwise distances over an indexed object set.
///
/// `raw(x, y)` is the distance before any axis has been projected out; the
/// recurrence in [`projection`](crate::projection) derives every later
/// residual from it. Implementations must be symmetric with a zero
/// diagonal. `Sync` is required because per-axis projection fans out over
/// objects in parallel.
pub trait MetricSource: Sync {
    /// Number of objects N.
    fn len(&self) -> usize;

    /// Returns true if the source holds no objects.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw distance between objects `x` and `y`.
    fn raw(&self, x: usize, y: usize) -> f64;
}

impl MetricSource for DistanceMatrix {
    #[inline]
    fn len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn raw(&self, x: usize, y: usize) -> f64 {
        self.get(x, y)
    }
}

/// An ordered object list plus a pairwise metric, evaluated on demand.
///
/// Evaluated pairs are cached in a concurrent map keyed on the ordered
/// index pair, so the metric runs at most once per unordered pair and the
/// source stays symmetric even for a sloppy metric. The self-distance is
/// 0 by definition and never consults the metric.
///
/// # Examples
///
/// ```
/// use fastmap::metric::{MetricSource, ObjectSet};
///
/// let words = vec!["kitten", "sitting", "mitten"];
/// let set = ObjectSet::new(words, |a: &&str, b: &&str| {
///     (a.len() as f64 - b.len() as f64).abs()
/// });
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.raw(0, 1), 1.0);
/// assert_eq!(set.raw(1, 0), 1.0);
/// assert_eq!(set.raw(2, 2), 0.0);
/// ```
pub struct ObjectSet<T, F>
where
    T: Sync,
    F: Fn(&T, &T) -> f64 + Sync,
{
    objects: Vec<T>,
    metric: F,
    cache: DashMap<(usize, usize), f64>,
}

impl<T, F> ObjectSet<T, F>
where
    T: Sync,
    F: Fn(&T, &T) -> f64 + Sync,
{
    /// Wraps an object list and its metric; no distances are computed yet.
    pub fn new(objects: Vec<T>, metric: F) -> Self {
        debug!("object source over {} objects", objects.len());
        Self {
            objects,
            metric,
            cache: DashMap::new(),
        }
    }

    /// Shared access to the wrapped objects, in input order.
    #[inline]
    pub fn objects(&self) -> &[T] {
        &self.objects
    }

    /// Number of distinct pairs whose metric value has been evaluated.
    pub fn evaluated_pairs(&self) -> usize {
        self.cache.len()
    }

    /// Consumes the source, returning the objects.
    pub fn into_objects(self) -> Vec<T> {
        self.objects
    }
}

impl<T, F> MetricSource for ObjectSet<T, F>
where
    T: Sync,
    F: Fn(&T, &T) -> f64 + Sync,
{
    #[inline]
    fn len(&self) -> usize {
        self.objects.len()
    }

    fn raw(&self, x: usize, y: usize) -> f64 {
        if x == y {
            return 0.0;
        }
        let key = (x.min(y), x.max(y));
        if let Some(d) = self.cache.get(&key) {
            return *d;
        }
        let d = (self.metric)(&self.objects[key.0], &self.objects[key.1]);
        self.cache.insert(key, d);
        d
    }
}
