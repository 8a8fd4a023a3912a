//! k-nearest neighbors classifier

use crate::core::{Classifier, Result, StrataError};
use crate::utils::{argmax_count, squared_euclidean};
use std::collections::BTreeMap;

/// Majority vote among the `k` closest training rows.
///
/// Distances are squared Euclidean. Rows at equal distance keep their
/// training order, and tied votes go to the smallest label.
#[derive(Debug, Clone)]
pub struct KNearestNeighbors {
    k: usize,
    samples: Vec<Vec<f64>>,
    labels: Vec<i32>,
}

impl KNearestNeighbors {
    /// Create an untrained model voting over `k` neighbors
    pub fn new(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(StrataError::InvalidParameter(
                "k must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            k,
            samples: Vec::new(),
            labels: Vec::new(),
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }
}

impl Default for KNearestNeighbors {
    fn default() -> Self {
        Self {
            k: 3,
            samples: Vec::new(),
            labels: Vec::new(),
        }
    }
}

impl Classifier for KNearestNeighbors {
    fn train(&mut self, samples: &[Vec<f64>], labels: &[i32]) -> Result<()> {
        if samples.len() != labels.len() {
            return Err(StrataError::DimensionMismatch {
                expected: samples.len(),
                actual: labels.len(),
            });
        }
        if samples.is_empty() {
            return Err(StrataError::EmptyDataset);
        }
        self.samples = samples.to_vec();
        self.labels = labels.to_vec();
        Ok(())
    }

    fn predict(&self, sample: &[f64]) -> Result<i32> {
        if self.samples.is_empty() {
            return Err(StrataError::ModelNotTrained);
        }

        let mut distances = self
            .samples
            .iter()
            .zip(&self.labels)
            .map(|(row, &label)| -> Result<(f64, i32)> {
                Ok((squared_euclidean(row, sample)?, label))
            })
            .collect::<Result<Vec<_>>>()?;
        // Stable sort keeps training order among equal distances
        distances.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut votes = BTreeMap::new();
        for &(_, label) in distances.iter().take(self.k) {
            *votes.entry(label).or_insert(0) += 1;
        }
        argmax_count(&votes).ok_or(StrataError::ModelNotTrained)
    }

    fn name(&self) -> &str {
        "knn"
    }
}
