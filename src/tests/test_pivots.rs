use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::{DistanceMatrix, EmbeddingMatrix};
use crate::pivots::{pick_pivots, PivotStrategy};
use crate::tests::{triangle, SEED};

fn pick(
    dist: &DistanceMatrix,
    strategy: &PivotStrategy,
    iterations: usize,
    seed: u64,
) -> (usize, usize) {
    let coords = EmbeddingMatrix::zeros(dist.len(), 1);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    pick_pivots(dist, &coords, 0, strategy, iterations, &mut rng)
}

#[test]
fn full_scan_finds_the_farthest_pair_on_a_triangle() {
    // d(1,2) = 5 is the max; one alternation round always lands on {1, 2}
    for seed in 0..10 {
        let (o1, o2) = pick(&triangle(), &PivotStrategy::FullScan, 1, seed);
        let mut pair = [o1, o2];
        pair.sort_unstable();
        assert_eq!(pair, [1, 2], "seed {seed}");
    }
}

#[test]
fn ties_resolve_to_the_lowest_index() {
    // equilateral: every scan ties, so the stable `>` scan keeps index order
    let dist = DistanceMatrix::from_fn(3, |_, _| 1.0);
    for seed in 0..10 {
        let (o1, o2) = pick(&dist, &PivotStrategy::FullScan, 1, seed);
        let mut pair = [o1, o2];
        pair.sort_unstable();
        assert_eq!(pair, [0, 1], "seed {seed}");
    }
}

#[test]
fn deterministic_given_a_fixed_seed() {
    let dist = DistanceMatrix::from_fn(12, |x, y| ((x * 7 + y * 13) % 11 + 1) as f64);
    let a = pick(&dist, &PivotStrategy::FullScan, 2, SEED);
    let b = pick(&dist, &PivotStrategy::FullScan, 2, SEED);
    assert_eq!(a, b);
}

#[test]
fn sampled_strategy_is_deterministic_and_in_bounds() {
    let n = 30;
    let dist = DistanceMatrix::from_fn(n, |x, y| ((x + 2 * y) % 9 + 1) as f64);
    let a = pick(&dist, &PivotStrategy::Sampled(5), 1, SEED);
    let b = pick(&dist, &PivotStrategy::Sampled(5), 1, SEED);
    assert_eq!(a, b);
    assert!(a.0 < n && a.1 < n);
}

#[test]
fn zero_iterations_clamp_to_one_round() {
    let (o1, o2) = pick(&triangle(), &PivotStrategy::FullScan, 0, SEED);
    assert_ne!(o1, o2);
}

#[test]
fn single_object_collapses_to_itself() {
    let dist = DistanceMatrix::from_rows(vec![vec![0.0]]).unwrap();
    let (o1, o2) = pick(&dist, &PivotStrategy::FullScan, 1, SEED);
    assert_eq!((o1, o2), (0, 0));
}

#[test]
fn later_axes_use_the_residual_metric() {
    // after axis 0 separates objects 1 and 2 fully, their residual distance
    // is 0 and the residual max pair must involve object 0; the residuals
    // d²(0,1) and d²(0,2) tie only in exact arithmetic, so either partner
    // is a correct pick
    let mut dist = triangle();
    dist.normalise();
    let mut coords = EmbeddingMatrix::zeros(3, 1);
    coords.set(0, 0, 0.36);
    coords.set(1, 0, 0.0);
    coords.set(2, 0, 1.0);

    for seed in 0..10 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let (o1, o2) = pick_pivots(&dist, &coords, 1, &PivotStrategy::FullScan, 1, &mut rng);
        let mut pair = [o1, o2];
        pair.sort_unstable();
        assert_eq!(pair[0], 0, "seed {seed}: pair {pair:?}");
        assert_ne!(pair[1], 0, "seed {seed}: pair {pair:?}");
    }
}
