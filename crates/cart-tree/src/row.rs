//! Labeled rows and dataset validation.

use crate::error::TreeError;

/// One training or test example: numeric features plus a trailing class label.
///
/// Labels are only ever compared by equality, so any `Clone + PartialEq`
/// type works: integers for numeric classes, `String` for categorical ones.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<L> {
    features: Vec<f64>,
    label: L,
}

impl<L> Row<L> {
    /// Create a row from its feature values and label.
    pub fn new(features: Vec<f64>, label: L) -> Self {
        Self { features, label }
    }

    /// Return the feature values.
    #[must_use]
    pub fn features(&self) -> &[f64] {
        &self.features
    }

    /// Return the value of one feature column.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn value(&self, index: usize) -> f64 {
        self.features[index]
    }

    /// Return the class label.
    #[must_use]
    pub fn label(&self) -> &L {
        &self.label
    }

    /// Return the number of feature columns.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.features.len()
    }
}

/// Check that a dataset is non-empty, rectangular and finite.
///
/// Returns the shared feature count.
pub(crate) fn validate_rows<'a, L: 'a>(
    rows: impl IntoIterator<Item = &'a Row<L>>,
) -> Result<usize, TreeError> {
    let mut rows = rows.into_iter().enumerate().peekable();
    let n_features = match rows.peek() {
        Some((_, first)) => first.n_features(),
        None => return Err(TreeError::EmptyDataset),
    };
    if n_features == 0 {
        return Err(TreeError::ZeroFeatures);
    }

    for (row_index, row) in rows {
        if row.n_features() != n_features {
            return Err(TreeError::FeatureCountMismatch {
                expected: n_features,
                got: row.n_features(),
                row_index,
            });
        }
        if let Some(feature_index) = row.features.iter().position(|v| !v.is_finite()) {
            return Err(TreeError::NonFiniteValue {
                row_index,
                feature_index,
            });
        }
    }
    Ok(n_features)
}
