//! Domain types for cart-io.

use cart_tree::Row;

use crate::IoError;

/// A validated experiment name for output file naming.
///
/// Must match `[a-zA-Z0-9_-]+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentName(String);

impl ExperimentName {
    /// Parse and validate an experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidExperimentName`] if the name is empty or
    /// contains characters outside `[a-zA-Z0-9_-]`.
    pub fn new(name: String) -> Result<Self, IoError> {
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(IoError::InvalidExperimentName { name });
        }
        Ok(Self(name))
    }

    /// Return the experiment name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExperimentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A labeled tabular dataset ready for training or evaluation.
///
/// Produced by [`DatasetReader`](crate::DatasetReader). Feature names come
/// from the CSV header (every column but the last); each row carries the
/// last column as its string label.
#[derive(Debug, Clone)]
pub struct LabeledDataset {
    feature_names: Vec<String>,
    rows: Vec<Row<String>>,
}

impl LabeledDataset {
    pub(crate) fn new(feature_names: Vec<String>, rows: Vec<Row<String>>) -> Self {
        Self { feature_names, rows }
    }

    /// Return the feature column names.
    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Return the rows in file order.
    #[must_use]
    pub fn rows(&self) -> &[Row<String>] {
        &self.rows
    }

    /// Consume the dataset, returning its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<Row<String>> {
        self.rows
    }

    /// Return the number of data rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Return the number of feature columns.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }
}
