//! Serializable rendering of holdout results
//!
//! Used by the CLI to print a summary or write a JSON report next to the
//! data. Reports are output only; nothing reads them back.

use crate::core::{ClassSummary, HoldoutReport, Result, StrataError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Serializable summary of a holdout evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializableReport {
    /// Name of the evaluated classifier
    pub classifier: String,
    /// Clamped training fraction
    pub train_ratio: f64,
    /// Per-class counts and quotas
    pub classes: Vec<SerializableClass>,
    pub n_training: usize,
    pub n_validation: usize,
    pub correct: usize,
    pub accuracy: f64,
    /// Report metadata
    pub metadata: ReportMetadata,
}

/// One class of the report; `name` is set when the loader knows it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializableClass {
    #[serde(flatten)]
    pub summary: ClassSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Metadata for tracking where a report came from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Library version used to create the report
    pub library_version: String,
    /// Creation timestamp
    pub created_at: String,
}

impl SerializableReport {
    /// Build a report. `class_names[label]` names a class when available.
    pub fn new(
        report: &HoldoutReport,
        classifier: &str,
        train_ratio: f64,
        class_names: Option<&[String]>,
    ) -> Self {
        let classes = report
            .classes
            .iter()
            .map(|summary| SerializableClass {
                summary: *summary,
                name: class_names
                    .and_then(|names| usize::try_from(summary.label).ok().and_then(|l| names.get(l)))
                    .cloned(),
            })
            .collect();

        Self {
            classifier: classifier.to_string(),
            train_ratio,
            classes,
            n_training: report.partition.training.len(),
            n_validation: report.partition.validation.len(),
            correct: report.correct,
            accuracy: report.accuracy,
            metadata: ReportMetadata {
                library_version: env!("CARGO_PKG_VERSION").to_string(),
                created_at: chrono::Utc::now().to_rfc3339(),
            },
        }
    }

    /// Pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| StrataError::SerializationError(e.to_string()))
    }

    /// Save report to file as JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path).map_err(StrataError::IoError)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| StrataError::SerializationError(e.to_string()))?;
        Ok(())
    }

    /// Print report summary
    pub fn print_summary(&self, detailed: bool) {
        println!("=== Holdout Validation ===");
        println!("Classifier: {}", self.classifier);
        println!("Train ratio: {:.2}", self.train_ratio);
        println!("Training samples: {}", self.n_training);
        println!("Validation samples: {}", self.n_validation);
        println!("Correct: {}/{}", self.correct, self.n_validation);
        println!("Accuracy: {:.2}%", self.accuracy * 100.0);

        if detailed {
            println!("\nClasses:");
            println!("  {:<16} {:>8} {:>8} {:>10}", "class", "count", "train", "validate");
            for class in &self.classes {
                let label = match &class.name {
                    Some(name) => format!("{} ({name})", class.summary.label),
                    None => class.summary.label.to_string(),
                };
                println!(
                    "  {:<16} {:>8} {:>8} {:>10}",
                    label,
                    class.summary.count,
                    class.summary.quota,
                    class.summary.held_out()
                );
            }
        }
    }
}
