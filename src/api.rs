//! High-level API for holdout validation
//!
//! This module provides a user-friendly interface for the common case:
//! load a dataset, pick one of the bundled classifiers and score it.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use strata::api::{quick, ClassifierKind};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = quick::holdout_csv("iris.csv", 0.66, ClassifierKind::NearestCentroid)?;
//! println!("Accuracy: {:.2}%", report.accuracy * 100.0);
//! # Ok(())
//! # }
//! ```

use crate::classifier::{KNearestNeighbors, MajorityClassifier, NearestCentroid};
use crate::core::{Classifier, Result};
use std::fmt;

/// Selects one of the bundled classifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassifierKind {
    /// Always predicts the most frequent training label
    Majority,
    /// Closest class mean
    #[default]
    NearestCentroid,
    /// Majority vote of the `k` nearest training rows
    Knn { k: usize },
}

impl ClassifierKind {
    /// Build an untrained classifier of this kind
    pub fn build(&self) -> Result<Box<dyn Classifier>> {
        Ok(match *self {
            ClassifierKind::Majority => Box::new(MajorityClassifier::new()),
            ClassifierKind::NearestCentroid => Box::new(NearestCentroid::new()),
            ClassifierKind::Knn { k } => Box::new(KNearestNeighbors::new(k)?),
        })
    }
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifierKind::Majority => write!(f, "majority"),
            ClassifierKind::NearestCentroid => write!(f, "nearest-centroid"),
            ClassifierKind::Knn { k } => write!(f, "knn (k={k})"),
        }
    }
}

/// Convenience functions for quick operations
pub mod quick {
    use super::*;
    use crate::core::{Dataset, HoldoutReport, LabeledData};
    use crate::data::{CSVDataset, LibSVMDataset};
    use crate::validation::HoldoutValidation;
    use std::path::Path;

    /// Holdout-validate a bundled classifier on any dataset
    pub fn holdout_dataset<D: Dataset + ?Sized>(
        dataset: &D,
        train_ratio: f64,
        kind: ClassifierKind,
    ) -> Result<HoldoutReport> {
        let mut classifier = kind.build()?;
        HoldoutValidation::new(train_ratio)?.evaluate_dataset(&mut classifier, dataset)
    }

    /// Holdout-validate on a CSV file whose last column holds class names
    pub fn holdout_csv<P: AsRef<Path>>(
        path: P,
        train_ratio: f64,
        kind: ClassifierKind,
    ) -> Result<HoldoutReport> {
        let dataset = CSVDataset::from_file(path)?;
        holdout_dataset(&dataset, train_ratio, kind)
    }

    /// Holdout-validate on a LibSVM file; labels are re-coded densely first
    pub fn holdout_libsvm<P: AsRef<Path>>(
        path: P,
        train_ratio: f64,
        kind: ClassifierKind,
    ) -> Result<HoldoutReport> {
        let dataset = LibSVMDataset::from_file(path)?.encode_labels()?;
        holdout_dataset(&dataset, train_ratio, kind)
    }

    /// Holdout accuracy on in-memory rows and labels
    pub fn holdout_samples(
        samples: Vec<Vec<f64>>,
        labels: Vec<i32>,
        train_ratio: f64,
        kind: ClassifierKind,
    ) -> Result<f64> {
        let data = LabeledData::new(samples, labels)?;
        holdout_dataset(&data, train_ratio, kind).map(|report| report.accuracy)
    }
}
