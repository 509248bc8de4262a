//! Actual-versus-predicted evaluation of a fitted tree.

use tracing::{debug, instrument};

use crate::confusion::ConfusionMatrix;
use crate::error::TreeError;
use crate::row::Row;
use crate::tree::DecisionTree;

/// Outcome of classifying a labeled dataset with a tree.
#[derive(Debug, Clone)]
pub struct Evaluation<'a, L> {
    /// `(actual, predicted)` for every row, in dataset order.
    pub outcomes: Vec<(&'a L, &'a L)>,
    /// Confusion matrix over the same outcomes.
    pub confusion_matrix: ConfusionMatrix<L>,
}

impl<L: Clone> Evaluation<'_, L> {
    /// Overall accuracy: proportion of rows whose label was predicted correctly.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        self.confusion_matrix.accuracy()
    }

    /// Number of rows evaluated.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.outcomes.len()
    }
}

impl<L: Clone + PartialEq> DecisionTree<L> {
    /// Classify every row and compare against its own label.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`TreeError::EmptyDataset`] | `rows` is empty |
    /// | [`TreeError::IndexMismatch`] | a row is too short for a traversed decision node |
    #[instrument(skip(self, rows), fields(n_rows = rows.len()))]
    pub fn evaluate<'a>(&'a self, rows: &'a [Row<L>]) -> Result<Evaluation<'a, L>, TreeError> {
        let outcomes = rows
            .iter()
            .map(|row| Ok((row.label(), self.predict_row(row)?)))
            .collect::<Result<Vec<_>, TreeError>>()?;

        let (actual, predicted): (Vec<&L>, Vec<&L>) = outcomes.iter().copied().unzip();
        let confusion_matrix = ConfusionMatrix::from_labels(&actual, &predicted)?;
        debug!(accuracy = confusion_matrix.accuracy(), "evaluated tree");

        Ok(Evaluation {
            outcomes,
            confusion_matrix,
        })
    }
}
