//! Strata Command Line Interface
//!
//! Runs stratified holdout validation of the bundled classifiers on CSV
//! and LibSVM data files.

use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{error, info, warn};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use strata::{
    CSVDataset, ClassifierKind, Dataset, HoldoutValidation, LabelPolicy, LibSVMDataset, Result,
    SerializableReport, StrataError,
};

#[derive(Parser)]
#[command(name = "strata")]
#[command(about = "Stratified holdout validation for classifiers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Strata Contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Split, train and report validation accuracy
    Evaluate(EvaluateArgs),
    /// Print the training and validation indices of the split
    Split(SplitArgs),
    /// Print per-class counts and training quotas
    Summary(DataArgs),
}

#[derive(Args)]
struct DataArgs {
    /// Data file (LibSVM or CSV format)
    #[arg(long)]
    data: PathBuf,

    /// Data format
    #[arg(short, long, default_value = "auto")]
    format: CliFormat,

    /// Keep LibSVM labels as written instead of re-coding them as 0..C-1
    #[arg(long)]
    raw_labels: bool,

    /// Fraction of each class used for training, clamped to [0.1, 1.0]
    #[arg(short, long, default_value = "0.66")]
    ratio: f64,

    /// Label validation policy
    #[arg(long, default_value = "dense")]
    label_policy: CliLabelPolicy,
}

#[derive(Args)]
struct EvaluateArgs {
    #[command(flatten)]
    data: DataArgs,

    /// Classifier to evaluate
    #[arg(short, long, default_value = "nearest-centroid")]
    classifier: CliClassifier,

    /// Number of neighbors for knn
    #[arg(short, long, default_value = "3")]
    k: usize,

    /// Write a JSON report to this file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Show per-class counts and quotas
    #[arg(long)]
    detailed: bool,
}

#[derive(Args)]
struct SplitArgs {
    #[command(flatten)]
    data: DataArgs,

    /// Output file (optional, prints to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum CliFormat {
    /// Detect from the file extension
    Auto,
    Csv,
    Libsvm,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CliClassifier {
    /// Most frequent training label
    Majority,
    /// Closest class mean
    #[value(name = "nearest-centroid")]
    NearestCentroid,
    /// k-nearest neighbors vote
    Knn,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CliLabelPolicy {
    /// Labels must be 0..C-1
    Dense,
    /// Any non-negative labels
    Sparse,
}

impl From<CliLabelPolicy> for LabelPolicy {
    fn from(cli_policy: CliLabelPolicy) -> Self {
        match cli_policy {
            CliLabelPolicy::Dense => LabelPolicy::Dense,
            CliLabelPolicy::Sparse => LabelPolicy::Sparse,
        }
    }
}

impl CliClassifier {
    fn kind(self, k: usize) -> ClassifierKind {
        match self {
            CliClassifier::Majority => ClassifierKind::Majority,
            CliClassifier::NearestCentroid => ClassifierKind::NearestCentroid,
            CliClassifier::Knn => ClassifierKind::Knn { k },
        }
    }
}

/// A loaded dataset and its class names, when the format carries them
struct LoadedData {
    dataset: Box<dyn Dataset>,
    class_names: Option<Vec<String>>,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Evaluate(args) => evaluate_command(args),
        Commands::Split(args) => split_command(args),
        Commands::Summary(args) => summary_command(args),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn evaluate_command(args: EvaluateArgs) -> Result<()> {
    let loaded = load_data(&args.data)?;
    let holdout = build_holdout(&args.data)?;
    let kind = args.classifier.kind(args.k);

    info!(
        "Evaluating {kind} with train ratio {:.2}",
        holdout.train_ratio()
    );

    let mut classifier = kind.build()?;
    let report = holdout.evaluate_dataset(&mut classifier, &*loaded.dataset)?;

    let rendered = SerializableReport::new(
        &report,
        classifier.name(),
        holdout.train_ratio(),
        loaded.class_names.as_deref(),
    );
    rendered.print_summary(args.detailed);

    if let Some(json_path) = args.json {
        rendered.save_to_file(&json_path)?;
        info!("Report saved to: {json_path:?}");
    }

    Ok(())
}

fn split_command(args: SplitArgs) -> Result<()> {
    let loaded = load_data(&args.data)?;
    let holdout = build_holdout(&args.data)?;
    let partition = holdout.partition(loaded.dataset.labels())?;

    info!(
        "Split {} samples: {} training, {} validation",
        partition.len(),
        partition.training.len(),
        partition.validation.len()
    );

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).map_err(StrataError::IoError)?,
        )),
        None => Box::new(std::io::stdout().lock()),
    };

    writeln!(out, "# Format: sample_index partition label")?;
    let labels = loaded.dataset.labels();
    for &i in &partition.training {
        writeln!(out, "{i} train {}", labels[i])?;
    }
    for &i in &partition.validation {
        writeln!(out, "{i} validate {}", labels[i])?;
    }
    out.flush()?;

    if let Some(path) = args.output {
        info!("Split saved to: {path:?}");
    }

    Ok(())
}

fn summary_command(args: DataArgs) -> Result<()> {
    let loaded = load_data(&args)?;
    let holdout = build_holdout(&args)?;
    let classes = holdout.class_summaries(loaded.dataset.labels())?;

    println!("=== Dataset Summary ===");
    println!("Samples: {}", loaded.dataset.len());
    println!("Features: {}", loaded.dataset.dim());
    println!("Classes: {}", classes.len());
    println!("Train ratio: {:.2}", holdout.train_ratio());
    println!("\n  {:<16} {:>8} {:>8} {:>10}", "class", "count", "train", "validate");

    for class in &classes {
        let name = class_display(loaded.class_names.as_deref(), class.label);
        println!(
            "  {:<16} {:>8} {:>8} {:>10}",
            name,
            class.count,
            class.quota,
            class.held_out()
        );
        if class.quota == 0 {
            warn!("Class {} gets no training examples", class.label);
        }
    }

    Ok(())
}

/// Label followed by its class name when one is known
fn class_display(class_names: Option<&[String]>, label: i32) -> String {
    class_names
        .and_then(|names| usize::try_from(label).ok().and_then(|l| names.get(l)))
        .map(|name| format!("{label} ({name})"))
        .unwrap_or_else(|| label.to_string())
}

fn build_holdout(args: &DataArgs) -> Result<HoldoutValidation> {
    if !(0.1..=1.0).contains(&args.ratio) {
        warn!("Train ratio {} will be clamped to [0.1, 1.0]", args.ratio);
    }
    Ok(HoldoutValidation::new(args.ratio)?.with_label_policy(args.label_policy.into()))
}

fn load_data(args: &DataArgs) -> Result<LoadedData> {
    let format = match args.format {
        CliFormat::Auto => detect_format(&args.data),
        other => other,
    };

    info!("Loading {:?} as {format:?}", args.data);

    let loaded = match format {
        CliFormat::Csv => {
            let dataset = CSVDataset::from_file(&args.data)?;
            let class_names = Some(dataset.class_names().to_vec());
            LoadedData {
                dataset: Box::new(dataset),
                class_names,
            }
        }
        _ => {
            let mut dataset = LibSVMDataset::from_file(&args.data)?;
            if !args.raw_labels {
                dataset = dataset.encode_labels()?;
            }
            let class_names = dataset.label_names().map(<[String]>::to_vec);
            LoadedData {
                dataset: Box::new(dataset),
                class_names,
            }
        }
    };

    info!(
        "Loaded {} samples with {} dimensions",
        loaded.dataset.len(),
        loaded.dataset.dim()
    );

    Ok(loaded)
}

fn detect_format(path: &Path) -> CliFormat {
    if let Some(ext) = path.extension() {
        match ext.to_str() {
            Some("csv") => CliFormat::Csv,
            Some("libsvm") | Some("svm") => CliFormat::Libsvm,
            _ => {
                warn!("Unknown file extension, assuming LibSVM format");
                CliFormat::Libsvm
            }
        }
    } else {
        warn!("No file extension, assuming LibSVM format");
        CliFormat::Libsvm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(detect_format(&PathBuf::from("test.csv")), CliFormat::Csv);
        assert_eq!(detect_format(&PathBuf::from("test.libsvm")), CliFormat::Libsvm);
        assert_eq!(detect_format(&PathBuf::from("test.svm")), CliFormat::Libsvm);
        assert_eq!(detect_format(&PathBuf::from("test")), CliFormat::Libsvm);
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "strata",
            "evaluate",
            "--data",
            "iris.csv",
            "--classifier",
            "knn",
            "-k",
            "5",
            "--ratio",
            "0.7",
        ])
        .unwrap();
        match cli.command {
            Commands::Evaluate(args) => {
                assert_eq!(args.k, 5);
                assert_eq!(args.data.ratio, 0.7);
                assert_eq!(args.classifier.kind(args.k), ClassifierKind::Knn { k: 5 });
            }
            _ => panic!("expected evaluate"),
        }
    }

    #[test]
    fn test_class_display() {
        let names = vec!["low".to_string(), "high".to_string()];
        assert_eq!(class_display(Some(names.as_slice()), 1), "1 (high)");
        assert_eq!(class_display(Some(names.as_slice()), 2), "2");
        assert_eq!(class_display(Some(names.as_slice()), -1), "-1");
        assert_eq!(class_display(None, 0), "0");
    }
}
