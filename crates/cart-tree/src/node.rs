use std::fmt;

/// Zero-based feature column index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeatureIndex(usize);

impl FeatureIndex {
    /// Create a new feature index from a zero-based column position.
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Return the zero-based feature column index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for FeatureIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Gini impurity of a partition. Lower is purer; zero is perfectly separated.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Impurity(f64);

impl Impurity {
    /// Create a new impurity value.
    pub(crate) fn new(value: f64) -> Self {
        Self(value)
    }

    /// Return the raw impurity value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Impurity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

/// A node of a fitted decision tree.
///
/// Each decision node owns both of its children, so a tree is a plain
/// acyclic value with no shared or back references.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<L> {
    /// An interior test: rows with `features[feature] < threshold` go left.
    Decision {
        /// Feature tested by this node.
        feature: FeatureIndex,
        /// Threshold value. Ties go right.
        threshold: f64,
        /// Subtree for rows below the threshold.
        left: Box<Node<L>>,
        /// Subtree for rows at or above the threshold.
        right: Box<Node<L>>,
    },
    /// A terminal node carrying its predicted class.
    Leaf {
        /// Predicted class label.
        label: L,
    },
}

impl<L> Node<L> {
    /// Create a leaf predicting `label`.
    pub fn leaf(label: L) -> Self {
        Node::Leaf { label }
    }

    /// Create a decision node owning both children.
    pub fn decision(feature: FeatureIndex, threshold: f64, left: Self, right: Self) -> Self {
        Node::Decision {
            feature,
            threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Return `true` if this node is a leaf.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Return the label if this node is a leaf.
    #[must_use]
    pub fn label(&self) -> Option<&L> {
        match self {
            Node::Leaf { label } => Some(label),
            Node::Decision { .. } => None,
        }
    }

    /// Return the number of nodes in this subtree, both decisions and leaves.
    #[must_use]
    pub fn n_nodes(&self) -> usize {
        self.walk().count()
    }

    /// Return the number of leaves in this subtree.
    #[must_use]
    pub fn n_leaves(&self) -> usize {
        self.walk().filter(|(node, _)| node.is_leaf()).count()
    }

    /// Return the length of the longest root-to-leaf path, in edges.
    ///
    /// A lone leaf has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.walk().map(|(_, depth)| depth).max().unwrap_or(0)
    }

    /// Iterate over `(node, depth)` pairs in pre-order, left before right.
    fn walk(&self) -> impl Iterator<Item = (&Node<L>, usize)> {
        let mut stack = vec![(self, 0usize)];
        std::iter::from_fn(move || {
            let (node, depth) = stack.pop()?;
            if let Node::Decision { left, right, .. } = node {
                stack.push((&**right, depth + 1));
                stack.push((&**left, depth + 1));
            }
            Some((node, depth))
        })
    }
}

impl<L: fmt::Display> fmt::Display for Node<L> {
    /// One line per node, indented by depth: `[X1 < 6.642]` for decisions
    /// (features numbered from 1) and `[label]` for leaves.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (node, depth) in self.walk() {
            let indent = depth * 2;
            match node {
                Node::Decision {
                    feature, threshold, ..
                } => writeln!(f, "{:indent$}[X{} < {threshold:.3}]", "", feature.index() + 1)?,
                Node::Leaf { label } => writeln!(f, "{:indent$}[{label}]", "")?,
            }
        }
        Ok(())
    }
}
