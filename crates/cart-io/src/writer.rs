//! JSON report writer for training runs.

use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

use cart_tree::{DecisionTree, Evaluation, TreeConfig};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::IoError;
use crate::domain::ExperimentName;

/// Writes training reports to JSON files.
///
/// Creates the output directory on construction if it does not exist.
/// Reports are named `{experiment}_report.json`. Only summary figures are
/// written; the tree itself is never persisted.
pub struct ReportWriter {
    output_dir: PathBuf,
    experiment: ExperimentName,
}

impl ReportWriter {
    /// Create a new writer targeting the given directory and experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::OutputDirCreate`] if the directory cannot be created.
    #[instrument(skip_all, fields(dir = %output_dir.display(), experiment = %experiment))]
    pub fn new(output_dir: &Path, experiment: ExperimentName) -> Result<Self, IoError> {
        fs::create_dir_all(output_dir).map_err(|e| IoError::OutputDirCreate {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        debug!("output directory ready");
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            experiment,
        })
    }

    /// Path of the report file this writer produces.
    #[must_use]
    pub fn report_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}_report.json", self.experiment.as_str()))
    }

    /// Write a training report to `{experiment}_report.json`.
    ///
    /// Labels are rendered with their `Display` impl. `test` is optional;
    /// when absent the `test` field is `null`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the report cannot be serialized or written.
    #[instrument(skip_all, fields(experiment = %self.experiment))]
    pub fn write_report<L: Clone + PartialEq + Display>(
        &self,
        config: &TreeConfig,
        tree: &DecisionTree<L>,
        feature_names: &[String],
        train: &Evaluation<'_, L>,
        test: Option<&Evaluation<'_, L>>,
    ) -> Result<PathBuf, IoError> {
        let path = self.report_path();

        let artifact = ReportArtifact {
            experiment: self.experiment.as_str(),
            config: ConfigEntry {
                max_depth: config.max_depth(),
                min_size: config.min_size(),
            },
            tree: TreeShape {
                n_features: tree.n_features(),
                depth: tree.depth(),
                n_nodes: tree.n_nodes(),
                n_leaves: tree.n_leaves(),
            },
            feature_names,
            train: EvaluationEntry::from_evaluation(train),
            test: test.map(EvaluationEntry::from_evaluation),
        };

        let json = serde_json::to_string_pretty(&artifact).map_err(|e| IoError::WriteFile {
            path: path.clone(),
            source: e.into(),
        })?;
        fs::write(&path, &json).map_err(|e| IoError::WriteFile {
            path: path.clone(),
            source: e,
        })?;

        info!(path = %path.display(), "report written");
        Ok(path)
    }
}

// --- Shadow structs for JSON serialization ---

#[derive(Serialize)]
struct ReportArtifact<'a> {
    experiment: &'a str,
    config: ConfigEntry,
    tree: TreeShape,
    feature_names: &'a [String],
    train: EvaluationEntry<'a>,
    test: Option<EvaluationEntry<'a>>,
}

#[derive(Serialize)]
struct ConfigEntry {
    max_depth: usize,
    min_size: usize,
}

#[derive(Serialize)]
struct TreeShape {
    n_features: usize,
    depth: usize,
    n_nodes: usize,
    n_leaves: usize,
}

#[derive(Serialize)]
struct EvaluationEntry<'a> {
    n_rows: usize,
    accuracy: f64,
    classes: Vec<String>,
    confusion_matrix: &'a [Vec<usize>],
    class_metrics: Vec<ClassEntry>,
}

impl<'a> EvaluationEntry<'a> {
    fn from_evaluation<L: Clone + PartialEq + Display>(eval: &'a Evaluation<'_, L>) -> Self {
        let matrix = &eval.confusion_matrix;
        Self {
            n_rows: eval.n_rows(),
            accuracy: eval.accuracy(),
            classes: matrix.classes().iter().map(ToString::to_string).collect(),
            confusion_matrix: matrix.as_rows(),
            class_metrics: matrix
                .class_metrics()
                .into_iter()
                .map(|m| ClassEntry {
                    class: m.class.to_string(),
                    precision: m.precision,
                    recall: m.recall,
                    f1: m.f1,
                    support: m.support,
                })
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct ClassEntry {
    class: String,
    precision: f64,
    recall: f64,
    f1: f64,
    support: usize,
}
