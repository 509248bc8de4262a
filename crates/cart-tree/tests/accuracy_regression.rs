//! Accuracy regression tests for cart-tree.
//!
//! These tests verify that algorithmic changes do not degrade classification
//! accuracy on a deterministic synthetic dataset.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use cart_tree::{Node, Row, TreeConfig};

// ---------------------------------------------------------------------------
// Helper: deterministic synthetic classification dataset
// ---------------------------------------------------------------------------

/// Generate a `n_rows`-row, 3-feature, 3-class dataset with string labels.
///
/// Feature 0 is informative (class * 3.0 + noise in [0, 0.5]).
/// Features 1-2 are pure noise in [0, 0.5].
/// Rows are assigned round-robin across classes.
fn make_classification(n_rows: usize, seed: u64) -> Vec<Row<String>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let names = ["setosa", "versicolor", "virginica"];

    (0..n_rows)
        .map(|i| {
            let class = i % names.len();
            let features: Vec<f64> = (0..3)
                .map(|f| {
                    let base = if f == 0 { class as f64 * 3.0 } else { 0.0 };
                    base + rng.r#gen::<f64>() * 0.5
                })
                .collect();
            Row::new(features, names[class].to_string())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// a) training_accuracy_above_threshold
// ---------------------------------------------------------------------------

/// Training accuracy with default limits must exceed 0.95.
#[test]
fn training_accuracy_above_threshold() {
    let rows = make_classification(150, 42);
    let tree = TreeConfig::default().fit(&rows).unwrap();
    let eval = tree.evaluate(&rows).unwrap();

    assert!(
        eval.accuracy() > 0.95,
        "training accuracy {} <= 0.95",
        eval.accuracy()
    );
}

// ---------------------------------------------------------------------------
// b) holdout_accuracy_above_threshold
// ---------------------------------------------------------------------------

/// Accuracy on an independently drawn sample must exceed 0.90.
#[test]
fn holdout_accuracy_above_threshold() {
    let train = make_classification(150, 42);
    let test = make_classification(90, 7);
    let tree = TreeConfig::default().fit(&train).unwrap();
    let eval = tree.evaluate(&test).unwrap();

    assert!(
        eval.accuracy() > 0.90,
        "holdout accuracy {} <= 0.90",
        eval.accuracy()
    );
}

// ---------------------------------------------------------------------------
// c) root_splits_on_informative_feature
// ---------------------------------------------------------------------------

/// The root test must use feature 0, the only informative column.
#[test]
fn root_splits_on_informative_feature() {
    let rows = make_classification(150, 42);
    let tree = TreeConfig::default().fit(&rows).unwrap();

    match tree.root() {
        Node::Decision { feature, .. } => assert_eq!(feature.index(), 0),
        Node::Leaf { .. } => panic!("root must be a decision node"),
    }
}

// ---------------------------------------------------------------------------
// d) deterministic_trees
// ---------------------------------------------------------------------------

/// Fitting the same rows twice must produce identical trees.
#[test]
fn deterministic_trees() {
    let rows = make_classification(150, 42);
    let config = TreeConfig::new(4, 3).unwrap();

    let first = config.fit(&rows).unwrap();
    let second = config.fit(&rows).unwrap();

    assert_eq!(first, second, "trees differ across runs on the same data");
}

// ---------------------------------------------------------------------------
// e) depth_respects_max_depth
// ---------------------------------------------------------------------------

/// No fitted tree may be deeper than its max_depth.
#[test]
fn depth_respects_max_depth() {
    let rows = make_classification(90, 3);
    for max_depth in 1..=4 {
        let tree = TreeConfig::new(max_depth, 1).unwrap().fit(&rows).unwrap();
        assert!(
            tree.depth() <= max_depth,
            "depth {} exceeds max_depth {max_depth}",
            tree.depth()
        );
    }
}

// ---------------------------------------------------------------------------
// f) huge_min_size_gives_stump
// ---------------------------------------------------------------------------

/// When min_size covers the whole dataset, only the root split is made.
#[test]
fn huge_min_size_gives_stump() {
    let rows = make_classification(60, 11);
    let tree = TreeConfig::new(10, rows.len()).unwrap().fit(&rows).unwrap();

    assert_eq!(tree.depth(), 1);
    assert_eq!(tree.n_leaves(), 2);
}
