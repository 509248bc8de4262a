use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use cart_io::{DatasetReader, ExperimentName, ReportWriter};
use cart_tree::{Row, TreeConfig};

#[derive(Parser)]
#[command(name = "cart")]
#[command(about = "Train and evaluate CART classification trees on tabular data")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Fit a tree on a labeled CSV file and write a JSON report
    Train {
        /// Path to the training CSV (feature columns, then the label column)
        #[arg(long)]
        data: PathBuf,

        /// Experiment name for output files (must match [a-zA-Z0-9_-]+)
        #[arg(long)]
        experiment: String,

        /// Optional held-out CSV with the same columns as the training data
        #[arg(long)]
        test: Option<PathBuf>,

        /// Output directory for result files
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        /// Maximum depth of decision nodes (the root is depth 1)
        #[arg(long, default_value_t = 5)]
        max_depth: usize,

        /// A split side with this many rows or fewer becomes a leaf
        #[arg(long, default_value_t = 10)]
        min_size: usize,

        /// Print the fitted tree to stderr
        #[arg(long, default_value_t = false)]
        show_tree: bool,
    },

    /// Fit a tree on the built-in ten-row sample and show its predictions
    Demo {
        /// Maximum depth of decision nodes
        #[arg(long, default_value_t = 2)]
        max_depth: usize,

        /// A split side with this many rows or fewer becomes a leaf
        #[arg(long, default_value_t = 2)]
        min_size: usize,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct TrainOutput {
    experiment: String,
    n_rows: usize,
    n_features: usize,
    depth: usize,
    n_leaves: usize,
    train_accuracy: f64,
    test_accuracy: Option<f64>,
    report: PathBuf,
}

#[derive(Serialize)]
struct DemoOutput {
    max_depth: usize,
    min_size: usize,
    depth: usize,
    n_leaves: usize,
    accuracy: f64,
    predictions: Vec<DemoPrediction>,
}

#[derive(Serialize)]
struct DemoPrediction {
    actual: i64,
    predicted: i64,
}

/// The ten-row, two-feature, two-class sample dataset.
fn sample_dataset() -> Vec<Row<i64>> {
    [
        (2.771244718, 1.784783929, 0),
        (1.728571309, 1.169761413, 0),
        (3.678319846, 2.81281357, 0),
        (3.961043357, 2.61995032, 0),
        (2.999208922, 2.209014212, 0),
        (7.497545867, 3.162953546, 1),
        (9.00220326, 3.339047188, 1),
        (7.444542326, 0.476683375, 1),
        (10.12493903, 3.234550982, 1),
        (6.642287351, 3.319983761, 1),
    ]
    .into_iter()
    .map(|(x1, x2, label)| Row::new(vec![x1, x2], label))
    .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Train {
            data,
            experiment,
            test,
            output_dir,
            max_depth,
            min_size,
            show_tree,
        } => {
            let experiment_name = ExperimentName::new(experiment.clone())?;
            let config = TreeConfig::new(max_depth, min_size)?;

            // 1. Read training data
            let dataset = DatasetReader::new(&data)
                .read()
                .context("failed to read training CSV")?;

            // 2. Read held-out data, which must share the training columns
            let holdout = test
                .as_deref()
                .map(|path| {
                    DatasetReader::new(path)
                        .read()
                        .context("failed to read test CSV")
                })
                .transpose()?;
            if let Some(holdout) = &holdout {
                ensure!(
                    holdout.n_features() == dataset.n_features(),
                    "test CSV has {} feature columns, training CSV has {}",
                    holdout.n_features(),
                    dataset.n_features()
                );
            }

            // 3. Fit
            let tree = config.fit(dataset.rows()).context("training failed")?;
            info!(
                depth = tree.depth(),
                n_leaves = tree.n_leaves(),
                "tree trained"
            );
            if show_tree {
                eprint!("{tree}");
            }

            // 4. Evaluate
            let train_eval = tree
                .evaluate(dataset.rows())
                .context("training evaluation failed")?;
            info!(accuracy = train_eval.accuracy(), "training accuracy");

            let test_eval = holdout
                .as_ref()
                .map(|h| tree.evaluate(h.rows()).context("test evaluation failed"))
                .transpose()?;
            if let Some(eval) = &test_eval {
                info!(accuracy = eval.accuracy(), "test accuracy");
            }

            // 5. Write report JSON
            let writer = ReportWriter::new(&output_dir, experiment_name)?;
            let report = writer.write_report(
                &config,
                &tree,
                dataset.feature_names(),
                &train_eval,
                test_eval.as_ref(),
            )?;

            // 6. Print summary
            let output = TrainOutput {
                experiment,
                n_rows: dataset.n_rows(),
                n_features: dataset.n_features(),
                depth: tree.depth(),
                n_leaves: tree.n_leaves(),
                train_accuracy: train_eval.accuracy(),
                test_accuracy: test_eval.as_ref().map(|e| e.accuracy()),
                report,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Demo {
            max_depth,
            min_size,
        } => {
            let rows = sample_dataset();
            let config = TreeConfig::new(max_depth, min_size)?;
            let tree = config.fit(&rows).context("training failed")?;
            eprint!("{tree}");

            let eval = tree.evaluate(&rows).context("evaluation failed")?;
            for &(actual, predicted) in &eval.outcomes {
                info!(actual, predicted, "classified sample row");
            }

            let output = DemoOutput {
                max_depth,
                min_size,
                depth: tree.depth(),
                n_leaves: tree.n_leaves(),
                accuracy: eval.accuracy(),
                predictions: eval
                    .outcomes
                    .iter()
                    .map(|&(&actual, &predicted)| DemoPrediction { actual, predicted })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
