//! Majority-class baseline

use crate::core::{Classifier, Result, StrataError};
use crate::utils::{argmax_count, class_counts};

/// Predicts the most frequent training label for every input.
///
/// Ties are broken towards the smallest label.
#[derive(Debug, Clone, Default)]
pub struct MajorityClassifier {
    majority: Option<i32>,
}

impl MajorityClassifier {
    /// Create an untrained baseline
    pub fn new() -> Self {
        Self::default()
    }

    /// The label that will be predicted, if trained
    pub fn majority_label(&self) -> Option<i32> {
        self.majority
    }
}

impl Classifier for MajorityClassifier {
    fn train(&mut self, samples: &[Vec<f64>], labels: &[i32]) -> Result<()> {
        if samples.len() != labels.len() {
            return Err(StrataError::DimensionMismatch {
                expected: samples.len(),
                actual: labels.len(),
            });
        }
        self.majority = Some(argmax_count(&class_counts(labels)).ok_or(StrataError::EmptyDataset)?);
        Ok(())
    }

    fn predict(&self, _sample: &[f64]) -> Result<i32> {
        self.majority.ok_or(StrataError::ModelNotTrained)
    }

    fn name(&self) -> &str {
        "majority"
    }
}
