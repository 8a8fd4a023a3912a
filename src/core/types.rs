//! Core type definitions for holdout validation

use crate::core::{Dataset, Result, StrataError};
use serde::{Deserialize, Serialize};

/// Smallest accepted training fraction
pub const MIN_TRAIN_RATIO: f64 = 0.1;
/// Largest accepted training fraction
pub const MAX_TRAIN_RATIO: f64 = 1.0;
/// Training fraction used when none is given
pub const DEFAULT_TRAIN_RATIO: f64 = 0.66;

/// Slack added before flooring a quota. Decimal ratios such as 0.29 are
/// not exact in binary, and `100.0 * 0.29` lands just below 29.
const QUOTA_EPSILON: f64 = 1e-9;

/// Fraction of each class assigned to the training partition.
///
/// Values are clamped into `[MIN_TRAIN_RATIO, MAX_TRAIN_RATIO]` on
/// construction, so an out-of-range request never fails.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct SplitRatio(f64);

impl SplitRatio {
    /// Create a ratio, clamping it into the accepted range.
    ///
    /// NaN cannot be clamped and is rejected.
    pub fn new(ratio: f64) -> Result<Self> {
        if ratio.is_nan() {
            return Err(StrataError::InvalidConfiguration(
                "train ratio must be a number, got NaN".to_string(),
            ));
        }
        Ok(Self(ratio.clamp(MIN_TRAIN_RATIO, MAX_TRAIN_RATIO)))
    }

    /// The clamped fraction
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Training quota for a class with `count` examples: `floor(count * ratio)`
    pub fn quota(&self, count: usize) -> usize {
        (count as f64 * self.0 + QUOTA_EPSILON).floor() as usize
    }
}

impl Default for SplitRatio {
    fn default() -> Self {
        Self(DEFAULT_TRAIN_RATIO)
    }
}

/// How label values are checked before per-class bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabelPolicy {
    /// Labels must be exactly `0..C-1` where C is the number of distinct labels
    #[default]
    Dense,
    /// Any non-negative label value is accepted
    Sparse,
}

/// Configuration for a holdout evaluation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HoldoutConfig {
    /// Training fraction applied to every class
    pub train_ratio: SplitRatio,
    /// Label validation policy
    pub label_policy: LabelPolicy,
}

/// Disjoint training/validation index sequences covering `0..N`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Partition {
    /// Training indices, increasing
    pub training: Vec<usize>,
    /// Validation indices, increasing
    pub validation: Vec<usize>,
}

impl Partition {
    /// Total number of indexed samples
    pub fn len(&self) -> usize {
        self.training.len() + self.validation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Per-class bookkeeping of a split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSummary {
    /// Class label
    pub label: i32,
    /// Number of examples of this class
    pub count: usize,
    /// Number of examples assigned to training
    pub quota: usize,
}

impl ClassSummary {
    /// Number of examples held out for validation
    pub fn held_out(&self) -> usize {
        self.count - self.quota
    }
}

/// Outcome of a holdout evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct HoldoutReport {
    /// The partition that was used
    pub partition: Partition,
    /// Per-class counts and quotas, ordered by label
    pub classes: Vec<ClassSummary>,
    /// Number of correctly predicted validation samples
    pub correct: usize,
    /// `correct / partition.validation.len()`
    pub accuracy: f64,
}

impl HoldoutReport {
    /// Labels of classes that received no training examples
    pub fn zero_quota_classes(&self) -> Vec<i32> {
        self.classes
            .iter()
            .filter(|c| c.quota == 0)
            .map(|c| c.label)
            .collect()
    }
}

/// In-memory dataset with fixed-length rows
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledData {
    samples: Vec<Vec<f64>>,
    labels: Vec<i32>,
    dimensions: usize,
}

impl LabeledData {
    /// Pair rows with labels, checking lengths and row widths
    pub fn new(samples: Vec<Vec<f64>>, labels: Vec<i32>) -> Result<Self> {
        if samples.len() != labels.len() {
            return Err(StrataError::DimensionMismatch {
                expected: samples.len(),
                actual: labels.len(),
            });
        }
        let dimensions = samples.first().map_or(0, Vec::len);
        if let Some(row) = samples.iter().find(|row| row.len() != dimensions) {
            return Err(StrataError::DimensionMismatch {
                expected: dimensions,
                actual: row.len(),
            });
        }
        Ok(Self {
            samples,
            labels,
            dimensions,
        })
    }

    /// Split back into rows and labels
    pub fn into_parts(self) -> (Vec<Vec<f64>>, Vec<i32>) {
        (self.samples, self.labels)
    }
}

impl Dataset for LabeledData {
    fn len(&self) -> usize {
        self.samples.len()
    }

    fn dim(&self) -> usize {
        self.dimensions
    }

    fn samples(&self) -> &[Vec<f64>] {
        &self.samples
    }

    fn labels(&self) -> &[i32] {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_ratio_clamping() {
        assert_eq!(SplitRatio::new(0.05).unwrap().value(), 0.1);
        assert_eq!(SplitRatio::new(-3.0).unwrap().value(), 0.1);
        assert_eq!(SplitRatio::new(1.7).unwrap().value(), 1.0);
        assert_eq!(SplitRatio::new(0.5).unwrap().value(), 0.5);
        assert_eq!(SplitRatio::default().value(), 0.66);
    }

    #[test]
    fn test_split_ratio_nan_rejected() {
        let result = SplitRatio::new(f64::NAN);
        assert!(matches!(
            result,
            Err(StrataError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_quota_floors() {
        let ratio = SplitRatio::new(0.66).unwrap();
        assert_eq!(ratio.quota(10), 6);
        assert_eq!(ratio.quota(3), 1);
        assert_eq!(ratio.quota(1), 0);
        assert_eq!(ratio.quota(0), 0);

        let half = SplitRatio::new(0.5).unwrap();
        assert_eq!(half.quota(1), 0);
        assert_eq!(half.quota(7), 3);

        let full = SplitRatio::new(1.0).unwrap();
        assert_eq!(full.quota(5), 5);
    }

    #[test]
    fn test_quota_exact_for_decimal_ratios() {
        // The f64 products fall just short of the whole number
        assert_eq!(SplitRatio::new(0.29).unwrap().quota(100), 29);
        assert_eq!(SplitRatio::new(0.57).unwrap().quota(100), 57);
        assert_eq!(SplitRatio::new(0.58).unwrap().quota(100), 58);
        assert_eq!(SplitRatio::new(0.29).unwrap().quota(1000), 290);
    }

    #[test]
    fn test_config_default() {
        let config = HoldoutConfig::default();
        assert_eq!(config.train_ratio.value(), DEFAULT_TRAIN_RATIO);
        assert_eq!(config.label_policy, LabelPolicy::Dense);
    }

    #[test]
    fn test_labeled_data_validation() {
        let data = LabeledData::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]], vec![0, 1]).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.dim(), 2);
        assert_eq!(data.sample(1), &[3.0, 4.0]);

        let mismatch = LabeledData::new(vec![vec![1.0]], vec![0, 1]);
        assert!(matches!(
            mismatch,
            Err(StrataError::DimensionMismatch {
                expected: 1,
                actual: 2
            })
        ));

        let ragged = LabeledData::new(vec![vec![1.0, 2.0], vec![3.0]], vec![0, 1]);
        assert!(matches!(
            ragged,
            Err(StrataError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_report_zero_quota_classes() {
        let report = HoldoutReport {
            partition: Partition::default(),
            classes: vec![
                ClassSummary {
                    label: 0,
                    count: 4,
                    quota: 2,
                },
                ClassSummary {
                    label: 1,
                    count: 1,
                    quota: 0,
                },
            ],
            correct: 0,
            accuracy: 0.0,
        };
        assert_eq!(report.zero_quota_classes(), vec![1]);
        assert_eq!(report.classes[0].held_out(), 2);
    }
}
