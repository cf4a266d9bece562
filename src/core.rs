//! Flat matrix containers for distance-only embedding.
//!
//! This module provides the three data shapes the engine works with:
//!
//! - [`DistanceMatrix`]: a dense, symmetric N×N matrix of pairwise distances
//!   in a flat row-major `Vec<f64>`, validated defensively on construction.
//! - [`EmbeddingMatrix`]: the N×K output coordinates, also flat row-major,
//!   zero-initialized so unfilled (degenerate) columns are defined as 0.
//! - [`PivotPairs`]: the 2×K axis-to-pivot bookkeeping, exposed for
//!   diagnostics only.
//!
//! Design goals:
//! - Single flat buffer per matrix, sized once at construction; no per-row
//!   allocation and no growth after creation.
//! - Bounds-checked accessors that panic on out-of-range indices.
//! - `smartcore` `DenseMatrix` conversions at the boundary so callers in
//!   that ecosystem can hand matrices across without manual reshaping.
//!
//! # Examples
//!
//! Build a validated distance matrix and read an entry:
//!
//! ```
//! use fastmap::core::DistanceMatrix;
//!
//! let dist = DistanceMatrix::from_rows(vec![
//!     vec![0.0, 3.0, 4.0],
//!     vec![3.0, 0.0, 5.0],
//!     vec![4.0, 5.0, 0.0],
//! ]).unwrap();
//! assert_eq!(dist.get(0, 2), 4.0);
//! ```
//!
//! # Panics
//!
//! - Indexing accessors panic on out-of-bounds indices.
//! - Construction from rows never panics; contract violations are reported
//!   through [`FastMapError::InvalidMatrix`](crate::error::FastMapError).

use log::debug;
use rayon::prelude::*;
use smartcore::linalg::basic::{
    arrays::{Array, Array2},
    matrix::DenseMatrix,
};

use crate::error::{FastMapError, Result};

/// Tolerance for the symmetry check: |d(x,y) − d(y,x)| must stay below this.
const SYMMETRY_EPS: f64 = 1e-9;

/// A dense, symmetric N×N matrix of non-negative pairwise distances.
///
/// Stored as a flat row-major buffer; entry `(x, y)` lives at `x * n + y`.
/// The validating constructor enforces the caller contract from the engine's
/// point of view: square shape, symmetry, zero diagonal, and finite
/// non-negative entries.
///
/// # Examples
///
/// ```
/// use fastmap::core::DistanceMatrix;
///
/// let dist = DistanceMatrix::from_fn(3, |x, y| (x as f64 - y as f64).abs());
/// assert_eq!(dist.len(), 3);
/// assert_eq!(dist.get(0, 2), 2.0);
/// assert_eq!(dist.get(2, 0), 2.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Builds from a vector of equally-sized rows with full validation.
    ///
    /// # Errors
    ///
    /// Returns [`FastMapError::InvalidMatrix`] if the input is non-square,
    /// asymmetric, has a nonzero diagonal, or contains negative or
    /// non-finite entries.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        for (x, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(FastMapError::InvalidMatrix(format!(
                    "row {} has {} entries, expected {}",
                    x,
                    row.len(),
                    n
                )));
            }
        }
        let mut data = Vec::with_capacity(n * n);
        for row in &rows {
            data.extend_from_slice(row);
        }
        let dist = Self { n, data };
        dist.validate()?;
        Ok(dist)
    }

    /// Builds an n×n matrix from a pairwise closure.
    ///
    /// Only the upper triangle is evaluated; the result is mirrored, so the
    /// matrix is symmetric by construction and the diagonal is exactly 0.
    /// No validation is performed beyond that structural guarantee; the
    /// closure is trusted to return non-negative finite values.
    pub fn from_fn<F>(n: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> f64,
    {
        let mut data = vec![0.0; n * n];
        for x in 0..n {
            for y in (x + 1)..n {
                let d = f(x, y);
                data[x * n + y] = d;
                data[y * n + x] = d;
            }
        }
        Self { n, data }
    }

    /// Builds the Euclidean distance matrix of a point set.
    ///
    /// Rows are computed in parallel; every point must have the same
    /// dimensionality.
    ///
    /// # Errors
    ///
    /// Returns [`FastMapError::DimensionMismatch`] if point lengths differ.
    pub fn from_points(points: &[Vec<f64>]) -> Result<Self> {
        let n = points.len();
        let dim = points.first().map(|p| p.len()).unwrap_or(0);
        for p in points {
            if p.len() != dim {
                return Err(FastMapError::DimensionMismatch {
                    expected: dim,
                    found: p.len(),
                });
            }
        }
        let data: Vec<f64> = (0..n)
            .into_par_iter()
            .flat_map_iter(|x| {
                let px = &points[x];
                (0..n).map(move |y| euclidean(px, &points[y]))
            })
            .collect();
        Ok(Self { n, data })
    }

    /// Converts from a smartcore `DenseMatrix`, validating the contract.
    ///
    /// # Errors
    ///
    /// Returns [`FastMapError::DimensionMismatch`] for non-square input and
    /// [`FastMapError::InvalidMatrix`] for contract violations.
    pub fn from_dense(m: &DenseMatrix<f64>) -> Result<Self> {
        let (nrows, ncols) = m.shape();
        if nrows != ncols {
            return Err(FastMapError::DimensionMismatch {
                expected: nrows,
                found: ncols,
            });
        }
        let mut data = Vec::with_capacity(nrows * ncols);
        for x in 0..nrows {
            data.extend(m.get_row(x).iterator(0).copied());
        }
        let dist = Self { n: nrows, data };
        dist.validate()?;
        Ok(dist)
    }

    /// Converts into a smartcore `DenseMatrix` (copies the buffer).
    pub fn to_dense(&self) -> DenseMatrix<f64> {
        DenseMatrix::from_iterator(self.data.iter().copied(), self.n, self.n, 0)
    }

    /// Number of objects N.
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Returns true if the matrix holds no objects.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between objects `x` and `y`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        assert!(x < self.n && y < self.n, "index out of bounds");
        self.data[x * self.n + y]
    }

    /// Largest entry in the matrix (0.0 when empty).
    pub fn max(&self) -> f64 {
        self.data.iter().fold(0.0_f64, |a, &b| a.max(b))
    }

    /// One-shot global rescale: if the max entry exceeds 1.0, divide every
    /// entry by it. Returns the scale factor that was applied (1.0 when the
    /// matrix was already within range).
    ///
    /// The matrix engine applies this once when it takes ownership, so all
    /// downstream geometry lives in `[0, 1]` distance units.
    pub fn normalise(&mut self) -> f64 {
        let max = self.max();
        if max > 1.0 {
            debug!("rescaling distance matrix by global max {:.6}", max);
            self.data.iter_mut().for_each(|d| *d /= max);
            max
        } else {
            1.0
        }
    }

    fn validate(&self) -> Result<()> {
        let n = self.n;
        for x in 0..n {
            let dxx = self.data[x * n + x];
            if dxx != 0.0 {
                return Err(FastMapError::InvalidMatrix(format!(
                    "diagonal entry ({x},{x}) is {dxx}, expected 0"
                )));
            }
            for y in 0..n {
                let d = self.data[x * n + y];
                if !d.is_finite() || d < 0.0 {
                    return Err(FastMapError::InvalidMatrix(format!(
                        "entry ({x},{y}) is {d}, expected a non-negative finite value"
                    )));
                }
                let mirrored = self.data[y * n + x];
                if (d - mirrored).abs() > SYMMETRY_EPS {
                    return Err(FastMapError::InvalidMatrix(format!(
                        "asymmetric at ({x},{y}): {d} vs {mirrored}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// The N×K output coordinates, one row per input object.
///
/// Zero-initialized flat row-major buffer; columns are filled left-to-right
/// as axes are computed, so columns the driver never reached (degenerate
/// early exit) read as 0 by definition.
///
/// # Examples
///
/// ```
/// use fastmap::core::EmbeddingMatrix;
///
/// let mut coords = EmbeddingMatrix::zeros(2, 3);
/// coords.set(1, 2, 0.5);
/// assert_eq!(coords.row(1), &[0.0, 0.0, 0.5]);
/// assert_eq!(coords.get(0, 0), 0.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmbeddingMatrix {
    nrows: usize,
    ncols: usize,
    data: Vec<f64>,
}

impl EmbeddingMatrix {
    /// Allocates an all-zero N×K coordinate matrix.
    #[inline]
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            nrows,
            ncols,
            data: vec![0.0; nrows * ncols],
        }
    }

    /// Returns (nrows, ncols) = (N objects, K axes).
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Coordinate of object `i` on axis `k`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= nrows` or `k >= ncols`.
    #[inline]
    pub fn get(&self, i: usize, k: usize) -> f64 {
        assert!(i < self.nrows && k < self.ncols, "index out of bounds");
        self.data[i * self.ncols + k]
    }

    /// Writes the coordinate of object `i` on axis `k`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= nrows` or `k >= ncols`.
    #[inline]
    pub fn set(&mut self, i: usize, k: usize, v: f64) {
        assert!(i < self.nrows && k < self.ncols, "index out of bounds");
        self.data[i * self.ncols + k] = v;
    }

    /// Borrowed coordinate row for object `i` (zero-copy).
    ///
    /// # Panics
    ///
    /// Panics if `i >= nrows`.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        assert!(i < self.nrows, "row index out of bounds");
        &self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    /// Owned copy of column `k` across all objects.
    ///
    /// # Panics
    ///
    /// Panics if `k >= ncols`.
    pub fn column(&self, k: usize) -> Vec<f64> {
        assert!(k < self.ncols, "column index out of bounds");
        (0..self.nrows)
            .map(|i| self.data[i * self.ncols + k])
            .collect()
    }

    /// Euclidean distance between the coordinate rows of objects `i` and `j`.
    #[inline]
    pub fn row_distance(&self, i: usize, j: usize) -> f64 {
        euclidean(self.row(i), self.row(j))
    }

    /// Copies out as a `Vec<Vec<f64>>`, one row per object.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.nrows).map(|i| self.row(i).to_vec()).collect()
    }

    /// Converts into a smartcore `DenseMatrix` (copies the buffer).
    pub fn to_dense(&self) -> DenseMatrix<f64> {
        DenseMatrix::from_iterator(self.data.iter().copied(), self.nrows, self.ncols, 0)
    }
}

/// The 2×K pivot bookkeeping: which object pair defined each axis.
///
/// Purely diagnostic; the engine fills one pair per computed axis and
/// leaves axes beyond a degenerate exit unset.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PivotPairs {
    pairs: Vec<Option<(usize, usize)>>,
}

impl PivotPairs {
    /// Allocates bookkeeping for `k` axes, all unset.
    #[inline]
    pub fn new(k: usize) -> Self {
        Self {
            pairs: vec![None; k],
        }
    }

    /// Number of axes this bookkeeping covers (K, not the filled count).
    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if no axes are tracked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The pivot pair chosen for `axis`, or `None` if the axis was never
    /// computed (degenerate exit or `axis >= K`).
    #[inline]
    pub fn get(&self, axis: usize) -> Option<(usize, usize)> {
        self.pairs.get(axis).copied().flatten()
    }

    /// Records the pivot pair for `axis`.
    ///
    /// # Panics
    ///
    /// Panics if `axis >= K`.
    #[inline]
    pub fn set(&mut self, axis: usize, px: usize, py: usize) {
        assert!(axis < self.pairs.len(), "axis out of bounds");
        self.pairs[axis] = Some((px, py));
    }

    /// Iterates the axes that were actually computed, in order.
    pub fn filled(&self) -> impl Iterator<Item = (usize, (usize, usize))> + '_ {
        self.pairs
            .iter()
            .enumerate()
            .filter_map(|(axis, p)| p.map(|pair| (axis, pair)))
    }
}

/// Euclidean norm of the element-wise difference, without allocating.
#[inline]
pub(crate) fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}
