//! Confusion matrix and per-class classification metrics.

use std::borrow::Borrow;
use std::fmt;

use crate::error::TreeError;

/// A confusion matrix over arbitrary class labels.
///
/// Classes are indexed in order of first occurrence across the actual
/// labels, then the predicted ones. Entry `matrix[actual][predicted]`
/// counts rows with that actual class predicted as that class.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionMatrix<L> {
    classes: Vec<L>,
    matrix: Vec<Vec<usize>>,
}

/// Per-class precision, recall, and F1 score.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMetrics<L> {
    /// The class label.
    pub class: L,
    /// Precision: TP / (TP + FP). 0.0 if no predictions for this class.
    pub precision: f64,
    /// Recall: TP / (TP + FN). 0.0 if no actual rows for this class.
    pub recall: f64,
    /// F1: 2 * precision * recall / (precision + recall). 0.0 if both are zero.
    pub f1: f64,
    /// Number of actual rows in this class.
    pub support: usize,
}

impl<L: Clone + PartialEq> ConfusionMatrix<L> {
    /// Build a confusion matrix from paired actual and predicted labels.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`TreeError::EmptyDataset`] | Zero labels provided |
    /// | [`TreeError::LabelCountMismatch`] | The two slices differ in length |
    pub fn from_labels<A, P>(actual: &[A], predicted: &[P]) -> Result<Self, TreeError>
    where
        A: Borrow<L>,
        P: Borrow<L>,
    {
        if actual.len() != predicted.len() {
            return Err(TreeError::LabelCountMismatch {
                actual: actual.len(),
                predicted: predicted.len(),
            });
        }
        if actual.is_empty() {
            return Err(TreeError::EmptyDataset);
        }

        let actual = actual.iter().map(Borrow::<L>::borrow);
        let predicted = predicted.iter().map(Borrow::<L>::borrow);

        let mut classes: Vec<L> = Vec::new();
        for label in actual.clone().chain(predicted.clone()) {
            if !classes.contains(label) {
                classes.push(label.clone());
            }
        }

        let position = |label: &L| classes.iter().position(|c| c == label).unwrap_or(0);
        let mut matrix = vec![vec![0usize; classes.len()]; classes.len()];
        for (a, p) in actual.zip(predicted) {
            matrix[position(a)][position(p)] += 1;
        }
        Ok(Self { classes, matrix })
    }
}

impl<L: Clone> ConfusionMatrix<L> {
    /// Overall accuracy: proportion of correct predictions.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        let correct: usize = (0..self.classes.len()).map(|i| self.matrix[i][i]).sum();
        let total: usize = self.matrix.iter().flat_map(|row| row.iter()).sum();
        if total == 0 {
            0.0
        } else {
            correct as f64 / total as f64
        }
    }

    /// Per-class precision, recall, F1, and support.
    #[must_use]
    pub fn class_metrics(&self) -> Vec<ClassMetrics<L>> {
        let n = self.classes.len();
        (0..n)
            .map(|c| {
                let tp = self.matrix[c][c];
                let fp: usize = (0..n).filter(|&i| i != c).map(|i| self.matrix[i][c]).sum();
                let fn_: usize = (0..n).filter(|&j| j != c).map(|j| self.matrix[c][j]).sum();
                let support = tp + fn_;
                let precision = if tp + fp == 0 {
                    0.0
                } else {
                    tp as f64 / (tp + fp) as f64
                };
                let recall = if support == 0 {
                    0.0
                } else {
                    tp as f64 / support as f64
                };
                let f1 = if precision + recall == 0.0 {
                    0.0
                } else {
                    2.0 * precision * recall / (precision + recall)
                };
                ClassMetrics {
                    class: self.classes[c].clone(),
                    precision,
                    recall,
                    f1,
                    support,
                }
            })
            .collect()
    }

    /// Return the class labels, in matrix order.
    #[must_use]
    pub fn classes(&self) -> &[L] {
        &self.classes
    }

    /// Return the underlying matrix rows.
    #[must_use]
    pub fn as_rows(&self) -> &[Vec<usize>] {
        &self.matrix
    }
}

impl<L: fmt::Display> fmt::Display for ConfusionMatrix<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>12}", "")?;
        for class in &self.classes {
            write!(f, " {:>10}", format!("pred_{class}"))?;
        }
        writeln!(f)?;

        for (class, row) in self.classes.iter().zip(&self.matrix) {
            write!(f, "{:>12}", format!("true_{class}"))?;
            for val in row {
                write!(f, " {val:>10}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
