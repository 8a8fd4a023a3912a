//! Stratified holdout validation
//!
//! Every class contributes `floor(count * ratio)` of its examples to the
//! training partition. Examples are assigned in their original order: the
//! first `quota` occurrences of a class train the model, the rest are held
//! out. No shuffling takes place, so the split is fully determined by the
//! input order.

use crate::core::{
    Classifier, ClassSummary, Dataset, HoldoutConfig, HoldoutReport, LabelPolicy, Partition,
    Result, SplitRatio, StrataError,
};
use crate::utils::{class_counts, select_rows, sum};
use log::{debug, warn};
use std::collections::BTreeMap;

/// Stratified train/validation splitter and accuracy evaluator
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HoldoutValidation {
    config: HoldoutConfig,
}

impl HoldoutValidation {
    /// Create an evaluator with the given training fraction.
    ///
    /// The fraction is clamped into `[0.1, 1.0]`; only NaN is rejected.
    pub fn new(train_ratio: f64) -> Result<Self> {
        Ok(Self::with_config(HoldoutConfig {
            train_ratio: SplitRatio::new(train_ratio)?,
            ..HoldoutConfig::default()
        }))
    }

    /// Create an evaluator from a full configuration
    pub fn with_config(config: HoldoutConfig) -> Self {
        Self { config }
    }

    /// Set the label validation policy
    pub fn with_label_policy(mut self, policy: LabelPolicy) -> Self {
        self.config.label_policy = policy;
        self
    }

    /// Clamped training fraction
    pub fn train_ratio(&self) -> f64 {
        self.config.train_ratio.value()
    }

    /// Ratio and label policy in effect
    pub fn config(&self) -> &HoldoutConfig {
        &self.config
    }

    /// Count each class and derive its training quota, ordered by label
    pub fn class_summaries(&self, labels: &[i32]) -> Result<Vec<ClassSummary>> {
        if labels.is_empty() {
            return Err(StrataError::EmptyDataset);
        }

        if let Some((index, &label)) = labels.iter().enumerate().find(|&(_, &l)| l < 0) {
            return Err(StrataError::InvalidLabel {
                label,
                index,
                reason: "labels must be non-negative".to_string(),
            });
        }

        let counts = class_counts(labels);

        if self.config.label_policy == LabelPolicy::Dense {
            let n_classes = counts.len();
            if let Some((index, &label)) = labels
                .iter()
                .enumerate()
                .find(|&(_, &l)| l as usize >= n_classes)
            {
                return Err(StrataError::InvalidLabel {
                    label,
                    index,
                    reason: format!(
                        "{n_classes} distinct classes found, labels must be coded 0..{}",
                        n_classes - 1
                    ),
                });
            }
        }

        Ok(counts
            .into_iter()
            .map(|(label, count)| ClassSummary {
                label,
                count,
                quota: self.config.train_ratio.quota(count),
            })
            .collect())
    }

    /// Compute the stratified partition of `labels` without training anything.
    ///
    /// Unlike `evaluate`, an empty validation side is not an error here.
    pub fn partition(&self, labels: &[i32]) -> Result<Partition> {
        let classes = self.class_summaries(labels)?;
        Ok(assign(labels, &classes))
    }

    /// Split, train `classifier` on the training side and report validation accuracy
    pub fn compute<C: Classifier + ?Sized>(
        &self,
        classifier: &mut C,
        samples: &[Vec<f64>],
        labels: &[i32],
    ) -> Result<f64> {
        self.evaluate(classifier, samples, labels)
            .map(|report| report.accuracy)
    }

    /// `compute` over a `Dataset`
    pub fn compute_dataset<C, D>(&self, classifier: &mut C, dataset: &D) -> Result<f64>
    where
        C: Classifier + ?Sized,
        D: Dataset + ?Sized,
    {
        self.compute(classifier, dataset.samples(), dataset.labels())
    }

    /// `evaluate` over a `Dataset`
    pub fn evaluate_dataset<C, D>(&self, classifier: &mut C, dataset: &D) -> Result<HoldoutReport>
    where
        C: Classifier + ?Sized,
        D: Dataset + ?Sized,
    {
        self.evaluate(classifier, dataset.samples(), dataset.labels())
    }

    /// Full holdout run returning the partition, class summaries and accuracy
    pub fn evaluate<C: Classifier + ?Sized>(
        &self,
        classifier: &mut C,
        samples: &[Vec<f64>],
        labels: &[i32],
    ) -> Result<HoldoutReport> {
        if samples.len() != labels.len() {
            return Err(StrataError::DimensionMismatch {
                expected: samples.len(),
                actual: labels.len(),
            });
        }
        check_row_widths(samples)?;

        let classes = self.class_summaries(labels)?;

        let zero_quota: Vec<i32> = classes
            .iter()
            .filter(|c| c.quota == 0)
            .map(|c| c.label)
            .collect();
        if !zero_quota.is_empty() {
            warn!(
                "Classes {zero_quota:?} get no training examples at ratio {}",
                self.train_ratio()
            );
        }

        let quotas: Vec<usize> = classes.iter().map(|c| c.quota).collect();
        let n_training = sum(&quotas);
        if n_training == labels.len() {
            return Err(StrataError::EmptyValidationSet);
        }
        if n_training == 0 {
            return Err(StrataError::InvalidConfiguration(format!(
                "train ratio {} leaves every class without training examples",
                self.train_ratio()
            )));
        }

        let partition = assign(labels, &classes);
        debug!(
            "Holdout split: {} training, {} validation across {} classes",
            partition.training.len(),
            partition.validation.len(),
            classes.len()
        );

        let train_samples = select_rows(samples, &partition.training);
        let train_labels = select_rows(labels, &partition.training);
        classifier.train(&train_samples, &train_labels)?;

        let mut correct = 0;
        for &i in &partition.validation {
            if classifier.predict(&samples[i])? == labels[i] {
                correct += 1;
            }
        }
        let accuracy = correct as f64 / partition.validation.len() as f64;

        debug!(
            "{} scored {correct}/{} on validation",
            classifier.name(),
            partition.validation.len()
        );

        Ok(HoldoutReport {
            partition,
            classes,
            correct,
            accuracy,
        })
    }
}

/// Single in-order pass: the first `quota` occurrences of each class train
fn assign(labels: &[i32], classes: &[ClassSummary]) -> Partition {
    let mut remaining: BTreeMap<i32, usize> =
        classes.iter().map(|c| (c.label, c.quota)).collect();
    let n_training: usize = remaining.values().sum();

    let mut training = Vec::with_capacity(n_training);
    let mut validation = Vec::with_capacity(labels.len() - n_training);

    for (i, label) in labels.iter().enumerate() {
        match remaining.get_mut(label) {
            Some(quota) if *quota > 0 => {
                *quota -= 1;
                training.push(i);
            }
            _ => validation.push(i),
        }
    }

    Partition {
        training,
        validation,
    }
}

fn check_row_widths(samples: &[Vec<f64>]) -> Result<()> {
    let Some(first) = samples.first() else {
        return Ok(());
    };
    match samples.iter().find(|row| row.len() != first.len()) {
        Some(row) => Err(StrataError::DimensionMismatch {
            expected: first.len(),
            actual: row.len(),
        }),
        None => Ok(()),
    }
}
