/// Broad category of a [`TreeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The dataset or label sequence handed to an operation is malformed.
    InvalidInput,
    /// A growth parameter is out of range.
    InvalidConfig,
    /// A row is too short for a feature tested during traversal.
    IndexMismatch,
}

/// Errors from tree construction, prediction and evaluation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TreeError {
    /// Returned when the dataset has zero rows.
    #[error("dataset has zero rows")]
    EmptyDataset,

    /// Returned when the rows have zero feature columns.
    #[error("rows have zero feature columns")]
    ZeroFeatures,

    /// Returned when a row has a different number of features than the first row.
    #[error("row {row_index} has {got} features, expected {expected}")]
    FeatureCountMismatch {
        /// The feature count of the first row.
        expected: usize,
        /// The feature count of the offending row.
        got: usize,
        /// The zero-based index of the offending row.
        row_index: usize,
    },

    /// Returned when a feature value is NaN or infinite.
    #[error("non-finite value at row {row_index}, feature {feature_index}")]
    NonFiniteValue {
        /// The zero-based index of the offending row.
        row_index: usize,
        /// The zero-based index of the offending feature column.
        feature_index: usize,
    },

    /// Returned when actual and predicted label sequences differ in length.
    #[error("got {actual} actual labels but {predicted} predicted labels")]
    LabelCountMismatch {
        /// Number of actual labels.
        actual: usize,
        /// Number of predicted labels.
        predicted: usize,
    },

    /// Returned when max_depth is zero.
    #[error("max_depth must be at least 1, got {max_depth}")]
    InvalidMaxDepth {
        /// The invalid max_depth value provided.
        max_depth: usize,
    },

    /// Returned when min_size is zero.
    #[error("min_size must be at least 1, got {min_size}")]
    InvalidMinSize {
        /// The invalid min_size value provided.
        min_size: usize,
    },

    /// Returned when a decision node tests a feature the input row does not have.
    #[error("decision node tests feature {feature_index}, but the row has only {row_len} values")]
    IndexMismatch {
        /// The feature index required by the decision node.
        feature_index: usize,
        /// The length of the row being classified.
        row_len: usize,
    },
}

impl TreeError {
    /// Return the broad category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            TreeError::EmptyDataset
            | TreeError::ZeroFeatures
            | TreeError::FeatureCountMismatch { .. }
            | TreeError::NonFiniteValue { .. }
            | TreeError::LabelCountMismatch { .. } => ErrorKind::InvalidInput,
            TreeError::InvalidMaxDepth { .. } | TreeError::InvalidMinSize { .. } => {
                ErrorKind::InvalidConfig
            }
            TreeError::IndexMismatch { .. } => ErrorKind::IndexMismatch,
        }
    }
}
