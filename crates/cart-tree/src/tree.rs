use std::fmt;

use tracing::{debug, instrument};

use crate::{
    TreeError,
    config::TreeConfig,
    node::Node,
    row::{Row, validate_rows},
    split::{SplitResult, best_split, distinct_labels},
};

/// Train a tree with the given growth limits.
///
/// Shorthand for `TreeConfig::new(max_depth, min_size)?.fit(rows)`.
///
/// # Errors
///
/// See [`TreeConfig::new`] and [`TreeConfig::fit`].
pub fn build_tree<L: Clone + PartialEq>(
    rows: &[Row<L>],
    max_depth: usize,
    min_size: usize,
) -> Result<DecisionTree<L>, TreeError> {
    TreeConfig::new(max_depth, min_size)?.fit(rows)
}

/// Return the most frequent label among `rows`.
///
/// Ties go to the label whose first occurrence comes earliest. Returns
/// `None` for an empty group.
pub fn majority_label<'a, L>(rows: impl IntoIterator<Item = &'a Row<L>>) -> Option<L>
where
    L: Clone + PartialEq + 'a,
{
    // (label, count) in first-occurrence order
    let mut tallies: Vec<(&L, usize)> = Vec::new();
    for row in rows {
        match tallies.iter_mut().find(|(label, _)| *label == row.label()) {
            Some((_, count)) => *count += 1,
            None => tallies.push((row.label(), 1)),
        }
    }

    let mut best: Option<(&L, usize)> = None;
    for (label, count) in tallies {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label.clone())
}

#[instrument(skip(config, rows), fields(n_rows = rows.len()))]
pub(crate) fn grow_tree<L: Clone + PartialEq>(
    config: &TreeConfig,
    rows: &[Row<L>],
) -> Result<DecisionTree<L>, TreeError> {
    let n_features = validate_rows(rows)?;

    debug!(
        n_features,
        n_classes = distinct_labels(rows).len(),
        max_depth = config.max_depth,
        min_size = config.min_size,
        "fitting decision tree"
    );

    let refs: Vec<&Row<L>> = rows.iter().collect();
    let grower = Grower { config, n_features };
    let root = grower.grow(best_split(&refs, n_features), 1);

    debug!(
        depth = root.depth(),
        n_nodes = root.n_nodes(),
        n_leaves = root.n_leaves(),
        "decision tree built"
    );

    Ok(DecisionTree { root, n_features })
}

/// Recursive growth state shared by every node of one fit.
struct Grower<'c> {
    config: &'c TreeConfig,
    n_features: usize,
}

impl Grower<'_> {
    /// Turn a split at `depth` into a decision node with resolved children.
    fn grow<L: Clone + PartialEq>(&self, split: SplitResult<'_, L>, depth: usize) -> Node<L> {
        let SplitResult {
            feature,
            threshold,
            left,
            right,
            ..
        } = split;

        // No separation achieved: both sides predict the same class.
        if left.is_empty() || right.is_empty() {
            let label = group_majority(left.iter().chain(&right).copied());
            return Node::decision(feature, threshold, Node::leaf(label.clone()), Node::leaf(label));
        }

        if depth >= self.config.max_depth {
            return Node::decision(
                feature,
                threshold,
                Node::leaf(group_majority(left)),
                Node::leaf(group_majority(right)),
            );
        }

        let left = self.grow_side(&left, depth);
        let right = self.grow_side(&right, depth);
        Node::decision(feature, threshold, left, right)
    }

    /// Resolve one side of a split: a leaf when the side is small or already
    /// pure, otherwise a further split one level deeper.
    fn grow_side<L: Clone + PartialEq>(&self, rows: &[&Row<L>], depth: usize) -> Node<L> {
        let pure = rows.windows(2).all(|pair| pair[0].label() == pair[1].label());
        if rows.len() <= self.config.min_size || pure {
            return Node::leaf(group_majority(rows.iter().copied()));
        }
        self.grow(best_split(rows, self.n_features), depth + 1)
    }
}

fn group_majority<'a, L: Clone + PartialEq + 'a>(rows: impl IntoIterator<Item = &'a Row<L>>) -> L {
    match majority_label(rows) {
        Some(label) => label,
        None => unreachable!("groups reaching a leaf always hold at least one row"),
    }
}

/// A fitted CART classification tree.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree<L> {
    pub(crate) root: Node<L>,
    pub(crate) n_features: usize,
}

impl<L> DecisionTree<L> {
    /// Wrap a hand-built node as a tree.
    ///
    /// The feature count is the smallest row length every decision node can
    /// be evaluated against.
    #[must_use]
    pub fn from_root(root: Node<L>) -> Self {
        let n_features = required_features(&root);
        Self { root, n_features }
    }

    /// Return the root node.
    #[must_use]
    pub fn root(&self) -> &Node<L> {
        &self.root
    }

    /// Return the number of features the tree was trained on.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Return the total number of nodes in the tree (both decisions and leaves).
    #[must_use]
    pub fn n_nodes(&self) -> usize {
        self.root.n_nodes()
    }

    /// Return the number of leaf nodes.
    #[must_use]
    pub fn n_leaves(&self) -> usize {
        self.root.n_leaves()
    }

    /// Return the maximum depth of the tree, in edges.
    ///
    /// A single-node tree (just a root leaf) has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}

fn required_features<L>(node: &Node<L>) -> usize {
    match node {
        Node::Leaf { .. } => 0,
        Node::Decision {
            feature,
            left,
            right,
            ..
        } => (feature.index() + 1)
            .max(required_features(left))
            .max(required_features(right)),
    }
}

impl<L: fmt::Display> fmt::Display for DecisionTree<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}
