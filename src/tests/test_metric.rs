use std::sync::atomic::{AtomicUsize, Ordering};

use crate::metric::{MetricSource, ObjectSet};
use crate::tests::triangle;

#[test]
fn matrix_source_is_a_lookup() {
    let dist = triangle();
    assert_eq!(MetricSource::len(&dist), 3);
    assert_eq!(dist.raw(0, 2), 4.0);
    assert_eq!(dist.raw(2, 0), 4.0);
}

#[test]
fn object_set_basic_contract() {
    let set = ObjectSet::new(vec![0.0_f64, 3.0, 7.0], |a: &f64, b: &f64| (a - b).abs());
    assert_eq!(set.len(), 3);
    assert!(!set.is_empty());
    assert_eq!(set.raw(0, 1), 3.0);
    assert_eq!(set.raw(1, 0), 3.0);
    assert_eq!(set.raw(1, 1), 0.0);
    assert_eq!(set.objects(), &[0.0, 3.0, 7.0]);
}

#[test]
fn object_set_memoizes_per_unordered_pair() {
    let calls = AtomicUsize::new(0);
    let set = ObjectSet::new(vec![1.0_f64, 2.0, 4.0], |a: &f64, b: &f64| {
        calls.fetch_add(1, Ordering::SeqCst);
        (a - b).abs()
    });

    assert_eq!(set.raw(0, 1), 1.0);
    assert_eq!(set.raw(1, 0), 1.0);
    assert_eq!(set.raw(0, 1), 1.0);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(set.evaluated_pairs(), 1);

    set.raw(1, 2);
    set.raw(0, 2);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(set.evaluated_pairs(), 3);
}

#[test]
fn object_set_self_distance_skips_the_metric() {
    let calls = AtomicUsize::new(0);
    let set = ObjectSet::new(vec!["a", "bb"], |a: &&str, b: &&str| {
        calls.fetch_add(1, Ordering::SeqCst);
        (a.len() as f64 - b.len() as f64).abs()
    });
    assert_eq!(set.raw(0, 0), 0.0);
    assert_eq!(set.raw(1, 1), 0.0);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn object_set_into_objects_returns_input_order() {
    let set = ObjectSet::new(vec![10, 20, 30], |a: &i32, b: &i32| (a - b).abs() as f64);
    assert_eq!(set.into_objects(), vec![10, 20, 30]);
}
