//! End-to-end integration tests: CSV -> fit -> evaluate -> JSON report.

use std::fs;
use std::path::Path;

use cart_io::{DatasetReader, ExperimentName, IoError, ReportWriter};
use cart_tree::{Node, TreeConfig};
use tempfile::TempDir;

/// Path to the test fixture directory.
fn fixture_path(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn train_and_report_round_trip() {
    // 1. Read CSV
    let dataset = DatasetReader::new(&fixture_path("sample_10.csv"))
        .read()
        .expect("fixture should parse");
    assert_eq!(dataset.n_rows(), 10);
    assert_eq!(dataset.feature_names(), ["x1", "x2"]);

    // 2. Fit a shallow tree; the sample is separable on x1
    let config = TreeConfig::new(2, 2).unwrap();
    let tree = config.fit(dataset.rows()).unwrap();
    match tree.root() {
        Node::Decision { feature, threshold, .. } => {
            assert_eq!(feature.index(), 0);
            assert_eq!(*threshold, 6.642287351);
        }
        Node::Leaf { .. } => panic!("root must be a decision node"),
    }
    let train = tree.evaluate(dataset.rows()).unwrap();
    assert_eq!(train.accuracy(), 1.0);

    // 3. Score the held-out rows
    let holdout = DatasetReader::new(&fixture_path("holdout_4.csv"))
        .read()
        .unwrap();
    let test = tree.evaluate(holdout.rows()).unwrap();

    // 4. Write the JSON report and read it back
    let dir = TempDir::new().unwrap();
    let experiment = ExperimentName::new("sample_rt".into()).unwrap();
    let writer = ReportWriter::new(dir.path(), experiment).unwrap();
    let path = writer
        .write_report(&config, &tree, dataset.feature_names(), &train, Some(&test))
        .unwrap();

    let content: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(content["experiment"], "sample_rt");
    assert_eq!(content["config"]["max_depth"], 2);
    assert_eq!(content["config"]["min_size"], 2);
    assert_eq!(content["tree"]["depth"], 1);
    assert_eq!(content["tree"]["n_nodes"], 3);
    assert_eq!(content["tree"]["n_leaves"], 2);
    assert_eq!(content["feature_names"], serde_json::json!(["x1", "x2"]));

    assert_eq!(content["train"]["n_rows"], 10);
    assert_eq!(content["train"]["accuracy"], 1.0);
    assert_eq!(content["train"]["classes"], serde_json::json!(["0", "1"]));
    assert_eq!(
        content["train"]["confusion_matrix"],
        serde_json::json!([[5, 0], [0, 5]])
    );

    // 6.0 sits below the learned threshold, so one class-1 row is missed
    assert_eq!(content["test"]["n_rows"], 4);
    assert_eq!(content["test"]["accuracy"], 0.75);
    assert_eq!(
        content["test"]["confusion_matrix"],
        serde_json::json!([[2, 0], [1, 1]])
    );
    let metrics = content["test"]["class_metrics"].as_array().unwrap();
    assert_eq!(metrics.len(), 2);
    assert_eq!(metrics[1]["class"], "1");
    assert_eq!(metrics[1]["precision"], 1.0);
    assert_eq!(metrics[1]["recall"], 0.5);
}

#[test]
fn report_has_no_tree_structure() {
    let dataset = DatasetReader::new(&fixture_path("sample_10.csv"))
        .read()
        .unwrap();
    let config = TreeConfig::default();
    let tree = config.fit(dataset.rows()).unwrap();
    let train = tree.evaluate(dataset.rows()).unwrap();

    let dir = TempDir::new().unwrap();
    let experiment = ExperimentName::new("shape_only".into()).unwrap();
    let writer = ReportWriter::new(dir.path(), experiment).unwrap();
    let path = writer
        .write_report(&config, &tree, dataset.feature_names(), &train, None)
        .unwrap();

    let content: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let keys: Vec<&str> = content
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();

    for key in ["experiment", "config", "tree", "feature_names", "train", "test"] {
        assert!(keys.contains(&key), "missing key {key}");
    }
    assert!(content["tree"].get("root").is_none());
    assert!(content["test"].is_null());
}

#[test]
fn reader_fixture_files_match_expected_errors() {
    // empty.csv -> EmptyDataset
    let result = DatasetReader::new(&fixture_path("empty.csv")).read();
    assert!(
        matches!(result, Err(IoError::EmptyDataset { .. })),
        "empty.csv should give EmptyDataset, got: {:?}",
        result
    );

    // jagged.csv -> InconsistentRowLength
    let result = DatasetReader::new(&fixture_path("jagged.csv")).read();
    assert!(
        matches!(result, Err(IoError::InconsistentRowLength { .. })),
        "jagged.csv should give InconsistentRowLength, got: {:?}",
        result
    );

    // nan.csv -> NonFiniteValue
    let result = DatasetReader::new(&fixture_path("nan.csv")).read();
    assert!(
        matches!(result, Err(IoError::NonFiniteValue { .. })),
        "nan.csv should give NonFiniteValue, got: {:?}",
        result
    );

    // inf.csv -> NonFiniteValue
    let result = DatasetReader::new(&fixture_path("inf.csv")).read();
    assert!(
        matches!(result, Err(IoError::NonFiniteValue { row_index: 1, .. })),
        "inf.csv should give NonFiniteValue, got: {:?}",
        result
    );

    // label_only.csv -> TooFewColumns
    let result = DatasetReader::new(&fixture_path("label_only.csv")).read();
    assert!(
        matches!(result, Err(IoError::TooFewColumns { .. })),
        "label_only.csv should give TooFewColumns, got: {:?}",
        result
    );

    // An unclosed quote swallows the rest of the file into one field, so the
    // record has a single column against a three-column header.
    let result = DatasetReader::new(&fixture_path("malformed.csv")).read();
    assert!(
        matches!(result, Err(IoError::InconsistentRowLength { got: 1, .. })),
        "malformed.csv should give InconsistentRowLength, got: {:?}",
        result
    );
}
