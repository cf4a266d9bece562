//! Error types for invalid caller input.
//!
//! The engine itself never fails mid-computation: negative squared residuals
//! from the projection recurrence are clamped locally and degenerate pivot
//! pairs terminate the axis loop early. Errors only arise when a distance
//! matrix handed in by the caller violates its contract.

use thiserror::Error;

/// Unified error type for all fastmap operations.
#[derive(Error, Debug)]
pub enum FastMapError {
    /// The input distance matrix violates the caller contract
    /// (non-square, asymmetric, negative, non-finite, or nonzero diagonal).
    #[error("invalid distance matrix: {0}")]
    InvalidMatrix(String),

    /// Shape mismatch when converting from an external matrix type.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, FastMapError>;
