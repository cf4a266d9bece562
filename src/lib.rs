//! # fastmap
//!
//! A K-dimensional Euclidean embedding of N objects from pairwise distances
//! only, via the FastMap heuristic (Faloutsos & Lin, 1995): iterative pivot
//! selection plus a recursive "distance after projection" recurrence that
//! together produce K orthogonal coordinate axes from nothing but a
//! distance oracle.
//!
//! Two engine flavors share the same core:
//!
//! - **Matrix engine**: consumes a precomputed symmetric N×N
//!   [`DistanceMatrix`](core::DistanceMatrix), rescaled once into `[0, 1]`
//!   units when the engine takes ownership.
//! - **On-the-fly engine**: consumes an object list plus a metric closure
//!   ([`ObjectSet`](metric::ObjectSet)), evaluating distances lazily with a
//!   per-pair memo. Suited to expensive metrics such as string edit
//!   distance.
//!
//! Per axis the driver selects two approximately maximally distant pivots
//! under the residual metric, then places every object on the pivot line
//! with the law-of-cosines projection. Prior axes are subtracted out in
//! squared-distance space, clamped at zero against floating-point drift.
//! A zero pivot distance means the space is exhausted: the remaining
//! columns stay at their defined value of 0 and the driver stops.
//!
//! Pivot selection draws from an injected seeded RNG, so a recorded seed
//! replays the exact embedding.
//!
//! # Examples
//!
//! Map three objects with a 3-4-5 triangle of distances into the plane:
//!
//! ```
//! use fastmap::builder::FastMapBuilder;
//! use fastmap::core::DistanceMatrix;
//!
//! let dist = DistanceMatrix::from_rows(vec![
//!     vec![0.0, 3.0, 4.0],
//!     vec![3.0, 0.0, 5.0],
//!     vec![4.0, 5.0, 0.0],
//! ]).unwrap();
//!
//! let engine = FastMapBuilder::new().with_seed(7).build(dist);
//! let embedding = engine.map(2);
//!
//! assert_eq!(embedding.coords.shape(), (3, 2));
//! // three points always fit a plane: pairwise distances survive
//! // (max-normalized, so the hypotenuse maps to 1.0)
//! assert!((embedding.coords.row_distance(1, 2) - 1.0).abs() < 1e-9);
//! ```
//!
//! Map strings through a metric closure, no matrix materialized:
//!
//! ```
//! use fastmap::builder::FastMapBuilder;
//!
//! let names = vec!["King Crimson", "King Lear", "Denis Leary"];
//! let engine = FastMapBuilder::new().with_seed(7).build_objects(
//!     names,
//!     |a: &&str, b: &&str| {
//!         let shared = a.chars().filter(|c| b.contains(*c)).count();
//!         (a.len() + b.len()) as f64 - 2.0 * shared as f64
//!     },
//! );
//! let embedding = engine.map(2);
//! assert_eq!(embedding.coords.shape(), (3, 2));
//! ```

pub mod builder;
pub mod core;
pub mod distortion;
pub mod engine;
pub mod error;
pub mod metric;
pub mod pivots;
pub mod projection;

pub use crate::builder::FastMapBuilder;
pub use crate::core::{DistanceMatrix, EmbeddingMatrix, PivotPairs};
pub use crate::engine::{Embedding, FastMap};
pub use crate::error::{FastMapError, Result};
pub use crate::metric::{MetricSource, ObjectSet};
pub use crate::pivots::PivotStrategy;

#[cfg(test)]
mod tests;
