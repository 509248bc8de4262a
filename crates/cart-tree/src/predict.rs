//! Tree traversal for classifying rows.

use crate::error::TreeError;
use crate::node::Node;
use crate::row::Row;
use crate::tree::DecisionTree;

impl<L> Node<L> {
    /// Classify a row by walking from this node down to a leaf.
    ///
    /// At each decision node the row goes left when
    /// `features[feature] < threshold` and right otherwise. Extra trailing
    /// values (such as a label column) are never read.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::IndexMismatch`] when a traversed decision node
    /// tests a feature beyond the end of `features`.
    pub fn predict(&self, features: &[f64]) -> Result<&L, TreeError> {
        let mut node = self;
        loop {
            match node {
                Node::Leaf { label } => return Ok(label),
                Node::Decision {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = features.get(feature.index()).ok_or(TreeError::IndexMismatch {
                        feature_index: feature.index(),
                        row_len: features.len(),
                    })?;
                    node = if value < threshold { &**left } else { &**right };
                }
            }
        }
    }
}

impl<L> DecisionTree<L> {
    /// Predict the class label for one feature vector.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::IndexMismatch`] when `features` is too short for
    /// a decision node on the traversed path.
    pub fn predict(&self, features: &[f64]) -> Result<&L, TreeError> {
        self.root.predict(features)
    }

    /// Predict the class label for a row, ignoring its own label.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::IndexMismatch`] when the row is too short for a
    /// decision node on the traversed path.
    pub fn predict_row(&self, row: &Row<L>) -> Result<&L, TreeError> {
        self.predict(row.features())
    }

    /// Predict the class label of every row, in order.
    ///
    /// # Errors
    ///
    /// Returns the first [`TreeError::IndexMismatch`] encountered.
    pub fn predict_batch(&self, rows: &[Row<L>]) -> Result<Vec<&L>, TreeError> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{ErrorKind, TreeError};
    use crate::node::{FeatureIndex, Node};
    use crate::row::Row;
    use crate::tree::DecisionTree;

    fn stump() -> DecisionTree<&'static str> {
        DecisionTree::from_root(Node::decision(
            FeatureIndex::new(1),
            2.5,
            Node::leaf("low"),
            Node::leaf("high"),
        ))
    }

    #[test]
    fn below_threshold_goes_left() {
        assert_eq!(*stump().predict(&[100.0, 2.4]).unwrap(), "low");
    }

    #[test]
    fn tie_goes_right() {
        assert_eq!(*stump().predict(&[0.0, 2.5]).unwrap(), "high");
    }

    #[test]
    fn lone_leaf_ignores_input() {
        let tree = DecisionTree::from_root(Node::leaf(9u8));
        assert_eq!(*tree.predict(&[]).unwrap(), 9);
    }

    #[test]
    fn short_row_is_index_mismatch() {
        let err = stump().predict(&[1.0]).unwrap_err();
        assert_eq!(
            err,
            TreeError::IndexMismatch {
                feature_index: 1,
                row_len: 1,
            }
        );
        assert_eq!(err.kind(), ErrorKind::IndexMismatch);
    }

    #[test]
    fn only_traversed_features_are_required() {
        // The right subtree tests feature 4, but a row going left never reaches it.
        let tree = DecisionTree::from_root(Node::decision(
            FeatureIndex::new(0),
            1.0,
            Node::leaf(0u8),
            Node::decision(FeatureIndex::new(4), 0.0, Node::leaf(1), Node::leaf(2)),
        ));
        assert_eq!(*tree.predict(&[0.5]).unwrap(), 0);
        assert!(tree.predict(&[1.5]).is_err());
    }

    #[test]
    fn batch_preserves_order() {
        let rows = vec![
            Row::new(vec![0.0, 3.0], "x"),
            Row::new(vec![0.0, 1.0], "y"),
        ];
        let tree = stump();
        let preds = tree.predict_batch(&rows).unwrap();
        assert_eq!(preds, vec![&"high", &"low"]);
    }
}
