//! CART classification trees: train, inspect, predict, evaluate.
//!
//! Provides a binary decision tree built by exhaustive split search over
//! every (feature, row value) threshold, scored with an unweighted Gini
//! impurity, grown recursively under depth and minimum-size limits, and
//! traversed with strict less-than tests for prediction.

mod config;
mod confusion;
mod error;
mod eval;
mod impurity;
mod node;
mod predict;
mod row;
mod split;
mod tree;

pub use config::TreeConfig;
pub use confusion::{ClassMetrics, ConfusionMatrix};
pub use error::{ErrorKind, TreeError};
pub use eval::Evaluation;
pub use impurity::{ClassCounts, gini_from_counts, score};
pub use node::{FeatureIndex, Impurity, Node};
pub use row::Row;
pub use split::{Partition, SplitResult, data_split, distinct_labels, find_best_split};
pub use tree::{DecisionTree, build_tree, majority_label};
