//! Embedding quality: reconstructed distances and mean squared distortion.
//!
//! An embedding is only as good as the pairwise geometry it preserves.
//! [`distance_matrix`] rebuilds the N×N distances implied by a coordinate
//! matrix; [`distortion`] compares two distance matrices after
//! max-normalizing each, yielding 0 for identical geometry and growing with
//! disagreement. The property tests use these to bound how far the
//! heuristic drifts from the true input distances.

use crate::core::{DistanceMatrix, EmbeddingMatrix};

/// Pairwise Euclidean distances implied by an embedding's rows.
pub fn distance_matrix(coords: &EmbeddingMatrix) -> DistanceMatrix {
    let (n, _) = coords.shape();
    DistanceMatrix::from_fn(n, |x, y| coords.row_distance(x, y))
}

/// Mean squared difference of two max-normalized distance matrices.
///
/// Each matrix is divided by its own maximum before comparison, so the
/// measure is scale-invariant; an all-zero matrix normalizes to itself.
///
/// # Panics
///
/// Panics if the matrices differ in size.
pub fn distortion(a: &DistanceMatrix, b: &DistanceMatrix) -> f64 {
    let n = a.len();
    assert_eq!(n, b.len(), "distance matrices must have the same size");
    if n == 0 {
        return 0.0;
    }

    let a_max = positive_or_one(a.max());
    let b_max = positive_or_one(b.max());

    let mut sum = 0.0;
    for x in 0..n {
        for y in 0..n {
            let gap = a.get(x, y) / a_max - b.get(x, y) / b_max;
            sum += gap * gap;
        }
    }
    sum / (n * n) as f64
}

#[inline]
fn positive_or_one(max: f64) -> f64 {
    if max > 0.0 {
        max
    } else {
        1.0
    }
}
