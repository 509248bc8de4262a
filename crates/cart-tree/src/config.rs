//! Configuration builder for tree growth.

use crate::error::TreeError;
use crate::row::Row;
use crate::tree::DecisionTree;

/// Growth limits for a CART classification tree.
///
/// Construct via [`TreeConfig::new`], then chain `with_*` methods.
///
/// # Defaults
///
/// | Parameter   | Default |
/// |-------------|---------|
/// | `max_depth` | 5       |
/// | `min_size`  | 10      |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    pub(crate) max_depth: usize,
    pub(crate) min_size: usize,
}

impl TreeConfig {
    /// Create a config with the given growth limits.
    ///
    /// `max_depth` caps the depth of decision nodes (the root is depth 1).
    /// A side of a split with `min_size` rows or fewer becomes a leaf.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`TreeError::InvalidMaxDepth`] | `max_depth` is zero |
    /// | [`TreeError::InvalidMinSize`] | `min_size` is zero |
    pub fn new(max_depth: usize, min_size: usize) -> Result<Self, TreeError> {
        Self { max_depth, min_size }.validated()
    }

    // --- Setters ---

    /// Set the maximum depth. Validated again by [`TreeConfig::fit`].
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the minimum size. Validated again by [`TreeConfig::fit`].
    #[must_use]
    pub fn with_min_size(mut self, min_size: usize) -> Self {
        self.min_size = min_size;
        self
    }

    // --- Getters ---

    /// Return the maximum depth.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Return the minimum size.
    #[must_use]
    pub fn min_size(&self) -> usize {
        self.min_size
    }

    /// Grow a tree on the provided rows.
    ///
    /// # Errors
    ///
    /// | Variant                               | When                                   |
    /// |---------------------------------------|----------------------------------------|
    /// | [`TreeError::InvalidMaxDepth`]        | `max_depth` is zero                    |
    /// | [`TreeError::InvalidMinSize`]         | `min_size` is zero                     |
    /// | [`TreeError::EmptyDataset`]           | `rows` is empty                        |
    /// | [`TreeError::ZeroFeatures`]           | rows have no feature columns           |
    /// | [`TreeError::FeatureCountMismatch`]   | rows have inconsistent lengths         |
    /// | [`TreeError::NonFiniteValue`]         | any feature value is NaN or infinite   |
    pub fn fit<L: Clone + PartialEq>(&self, rows: &[Row<L>]) -> Result<DecisionTree<L>, TreeError> {
        crate::tree::grow_tree(&self.validated()?, rows)
    }

    fn validated(self) -> Result<Self, TreeError> {
        if self.max_depth == 0 {
            return Err(TreeError::InvalidMaxDepth {
                max_depth: self.max_depth,
            });
        }
        if self.min_size == 0 {
            return Err(TreeError::InvalidMinSize {
                min_size: self.min_size,
            });
        }
        Ok(self)
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            min_size: 10,
        }
    }
}
