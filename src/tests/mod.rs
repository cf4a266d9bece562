mod test_metric;
mod test_pivots;

use crate::core::DistanceMatrix;

pub const SEED: u64 = 128;

/// 3-4-5 right-triangle distances; three points always embed exactly in 2D.
pub fn triangle() -> DistanceMatrix {
    DistanceMatrix::from_rows(vec![
        vec![0.0, 3.0, 4.0],
        vec![3.0, 0.0, 5.0],
        vec![4.0, 5.0, 0.0],
    ])
    .unwrap()
}
