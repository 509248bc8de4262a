//! Gini scoring of candidate partitions.
//!
//! The score sums `p * (1 - p)` over every (class, non-empty group) pair
//! without weighting groups by their share of the rows. A perfectly
//! separated partition scores 0; a single evenly mixed binary group scores
//! 0.5.

use crate::node::Impurity;
use crate::row::Row;

/// Per-class row counts of one group.
///
/// `counts[i]` is the number of rows whose label equals the `i`-th entry of
/// the class list the counts were built against. `total` also includes rows
/// whose label is not in that list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassCounts {
    counts: Vec<usize>,
    total: usize,
}

impl ClassCounts {
    /// Create zeroed counts for `n_classes` classes.
    #[must_use]
    pub fn new(n_classes: usize) -> Self {
        Self {
            counts: vec![0; n_classes],
            total: 0,
        }
    }

    /// Count the rows of a group against a class list.
    #[must_use]
    pub fn from_group<L: PartialEq>(group: &[&Row<L>], classes: &[L]) -> Self {
        let mut counts = Self::new(classes.len());
        for row in group {
            counts.add(classes.iter().position(|c| c == row.label()));
        }
        counts
    }

    /// Record one row. `class` is `None` for a label outside the class list.
    pub fn add(&mut self, class: Option<usize>) {
        if let Some(c) = class {
            self.counts[c] += 1;
        }
        self.total += 1;
    }

    /// Reset every count to zero, keeping the class count.
    pub fn clear(&mut self) {
        self.counts.iter_mut().for_each(|c| *c = 0);
        self.total = 0;
    }

    /// Return the number of rows recorded.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Return the per-class counts.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.counts
    }
}

/// Score a partition from its per-group class counts.
///
/// Classes are visited in order, and for each class every non-empty group
/// in order, so the floating-point sum matches [`score`] exactly.
#[must_use]
pub fn gini_from_counts(groups: &[ClassCounts]) -> Impurity {
    let n_classes = groups.first().map_or(0, |g| g.counts.len());
    let mut gini = 0.0;
    for class in 0..n_classes {
        for group in groups {
            if group.total == 0 {
                continue;
            }
            let p = group.counts[class] as f64 / group.total as f64;
            gini += p * (1.0 - p);
        }
    }
    Impurity::new(gini)
}

/// Score a partition of rows into groups against a class list.
///
/// Empty groups contribute nothing.
#[must_use]
pub fn score<L: PartialEq>(groups: &[&[&Row<L>]], classes: &[L]) -> Impurity {
    let counts: Vec<ClassCounts> = groups
        .iter()
        .map(|group| ClassCounts::from_group(group, classes))
        .collect();
    gini_from_counts(&counts)
}
