use tracing::trace;

use crate::error::TreeError;
use crate::impurity::{ClassCounts, gini_from_counts};
use crate::node::{FeatureIndex, Impurity};
use crate::row::{Row, validate_rows};

/// Rows separated by a threshold test on one feature.
///
/// Both groups keep the input order. Either may be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<'a, L> {
    /// Rows whose value is strictly below the threshold.
    pub left: Vec<&'a Row<L>>,
    /// Rows whose value is at or above the threshold.
    pub right: Vec<&'a Row<L>>,
}

/// Best split found for a set of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitResult<'a, L> {
    /// Feature tested by the split.
    pub feature: FeatureIndex,
    /// Threshold value, taken from one of the rows.
    pub threshold: f64,
    /// Gini score of the resulting partition.
    pub score: Impurity,
    /// Rows sent left by the split.
    pub left: Vec<&'a Row<L>>,
    /// Rows sent right by the split.
    pub right: Vec<&'a Row<L>>,
}

/// Return the distinct labels of `rows` in order of first occurrence.
pub fn distinct_labels<'a, L>(rows: impl IntoIterator<Item = &'a Row<L>>) -> Vec<L>
where
    L: Clone + PartialEq + 'a,
{
    let mut classes: Vec<L> = Vec::new();
    for row in rows {
        if !classes.contains(row.label()) {
            classes.push(row.label().clone());
        }
    }
    classes
}

/// Partition rows on `feature < threshold`.
///
/// # Panics
///
/// Panics if a row has no value at `feature`.
pub fn data_split<'a, L: 'a>(
    feature: usize,
    threshold: f64,
    rows: impl IntoIterator<Item = &'a Row<L>>,
) -> Partition<'a, L> {
    let (left, right) = rows
        .into_iter()
        .partition(|row| row.value(feature) < threshold);
    Partition { left, right }
}

/// Exhaustively search every (feature, row value) threshold for the lowest
/// Gini score.
///
/// Candidates are visited feature by feature, and within a feature in row
/// order. Only a strictly lower score replaces the current best, so the
/// first candidate reaching the minimum wins.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`TreeError::EmptyDataset`] | `rows` is empty |
/// | [`TreeError::ZeroFeatures`] | rows have no feature columns |
/// | [`TreeError::FeatureCountMismatch`] | rows have inconsistent lengths |
/// | [`TreeError::NonFiniteValue`] | any feature value is NaN or infinite |
pub fn find_best_split<L: Clone + PartialEq>(
    rows: &[Row<L>],
) -> Result<SplitResult<'_, L>, TreeError> {
    let n_features = validate_rows(rows)?;
    let refs: Vec<&Row<L>> = rows.iter().collect();
    Ok(best_split(&refs, n_features))
}

/// Split search over already-validated, non-empty rows.
pub(crate) fn best_split<'a, L: Clone + PartialEq>(
    rows: &[&'a Row<L>],
    n_features: usize,
) -> SplitResult<'a, L> {
    let classes = distinct_labels(rows.iter().copied());
    let class_of: Vec<Option<usize>> = rows
        .iter()
        .map(|row| classes.iter().position(|c| c == row.label()))
        .collect();

    let mut groups = [
        ClassCounts::new(classes.len()),
        ClassCounts::new(classes.len()),
    ];

    // (feature, threshold, score)
    let mut best: Option<(usize, f64, Impurity)> = None;

    for feature in 0..n_features {
        for candidate in rows {
            let threshold = candidate.value(feature);
            groups.iter_mut().for_each(ClassCounts::clear);
            for (row, &class) in rows.iter().zip(&class_of) {
                let side = if row.value(feature) < threshold { 0 } else { 1 };
                groups[side].add(class);
            }
            let score = gini_from_counts(&groups);
            trace!(
                feature = feature + 1,
                threshold,
                score = score.value(),
                "scored candidate split"
            );

            if best.is_none_or(|(_, _, best_score)| score < best_score) {
                best = Some((feature, threshold, score));
            }
        }
    }

    let Some((feature, threshold, score)) = best else {
        unreachable!("non-empty rows with at least one feature always yield a candidate");
    };
    let Partition { left, right } = data_split(feature, threshold, rows.iter().copied());

    SplitResult {
        feature: FeatureIndex::new(feature),
        threshold,
        score,
        left,
        right,
    }
}

#[cfg(test)]
mod tests {
    use super::{data_split, distinct_labels, find_best_split};
    use crate::error::TreeError;
    use crate::row::Row;

    #[test]
    fn distinct_labels_keep_first_occurrence_order() {
        let rows = vec![
            Row::new(vec![0.0], 3),
            Row::new(vec![0.0], 1),
            Row::new(vec![0.0], 3),
            Row::new(vec![0.0], 2),
        ];
        assert_eq!(distinct_labels(&rows), vec![3, 1, 2]);
    }

    #[test]
    fn data_split_sends_ties_right() {
        let rows = vec![
            Row::new(vec![1.0], 0),
            Row::new(vec![2.0], 0),
            Row::new(vec![2.0], 1),
            Row::new(vec![3.0], 1),
        ];
        let part = data_split(0, 2.0, &rows);
        assert_eq!(part.left, vec![&rows[0]]);
        assert_eq!(part.right, vec![&rows[1], &rows[2], &rows[3]]);
    }

    #[test]
    fn data_split_can_leave_a_side_empty() {
        let rows = vec![Row::new(vec![5.0], 0), Row::new(vec![7.0], 1)];
        let part = data_split(0, 5.0, &rows);
        assert!(part.left.is_empty());
        assert_eq!(part.right.len(), 2);
    }

    #[test]
    fn separable_data_finds_zero_score_split() {
        let rows = vec![
            Row::new(vec![1.0, 9.0], 0),
            Row::new(vec![2.0, 1.0], 0),
            Row::new(vec![10.0, 8.0], 1),
            Row::new(vec![11.0, 2.0], 1),
        ];
        let split = find_best_split(&rows).unwrap();
        assert_eq!(split.feature.index(), 0);
        assert_eq!(split.threshold, 10.0);
        assert_eq!(split.score.value(), 0.0);
        assert_eq!(split.left, vec![&rows[0], &rows[1]]);
        assert_eq!(split.right, vec![&rows[2], &rows[3]]);
    }

    #[test]
    fn ties_keep_the_first_candidate() {
        // Both features separate the classes perfectly; feature 0 is scanned first.
        let rows = vec![
            Row::new(vec![1.0, 1.0], 0),
            Row::new(vec![5.0, 5.0], 1),
        ];
        let split = find_best_split(&rows).unwrap();
        assert_eq!(split.feature.index(), 0);
        assert_eq!(split.threshold, 5.0);
    }

    #[test]
    fn groups_belong_to_the_best_candidate() {
        // The last candidate scanned (feature 1, value 0.0) puts every row
        // right; the reported groups must still be those of the winner.
        let rows = vec![
            Row::new(vec![1.0, 3.0], 0),
            Row::new(vec![2.0, 2.0], 0),
            Row::new(vec![3.0, 1.0], 1),
            Row::new(vec![4.0, 0.0], 1),
        ];
        let split = find_best_split(&rows).unwrap();
        assert_eq!(split.feature.index(), 0);
        assert_eq!(split.threshold, 3.0);
        let recheck = data_split(0, 3.0, &rows);
        assert_eq!(split.left, recheck.left);
        assert_eq!(split.right, recheck.right);
    }

    #[test]
    fn homogeneous_rows_still_split() {
        // Every candidate scores 0; the first one (feature 0, row 0) wins and
        // leaves the left side empty.
        let rows = vec![Row::new(vec![1.0], 7), Row::new(vec![2.0], 7)];
        let split = find_best_split(&rows).unwrap();
        assert_eq!(split.threshold, 1.0);
        assert!(split.left.is_empty());
        assert_eq!(split.right.len(), 2);
    }

    #[test]
    fn empty_rows_rejected() {
        let rows: Vec<Row<u8>> = vec![];
        assert_eq!(find_best_split(&rows).unwrap_err(), TreeError::EmptyDataset);
    }

    #[test]
    fn ragged_rows_rejected() {
        let rows = vec![Row::new(vec![1.0, 2.0], 0), Row::new(vec![1.0], 1)];
        assert!(matches!(
            find_best_split(&rows).unwrap_err(),
            TreeError::FeatureCountMismatch { row_index: 1, .. }
        ));
    }
}
