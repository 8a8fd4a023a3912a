//! Nearest centroid classifier

use crate::core::{Classifier, Result, StrataError};
use crate::utils::{mean_vector, squared_euclidean};
use std::collections::BTreeMap;

/// Assigns each input to the class whose training mean is closest
/// (squared Euclidean distance). Equal distances favor the smaller label.
#[derive(Debug, Clone, Default)]
pub struct NearestCentroid {
    centroids: Vec<(i32, Vec<f64>)>,
    dimensions: usize,
}

impl NearestCentroid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trained centroids ordered by label
    pub fn centroids(&self) -> &[(i32, Vec<f64>)] {
        &self.centroids
    }
}

impl Classifier for NearestCentroid {
    fn train(&mut self, samples: &[Vec<f64>], labels: &[i32]) -> Result<()> {
        if samples.len() != labels.len() {
            return Err(StrataError::DimensionMismatch {
                expected: samples.len(),
                actual: labels.len(),
            });
        }
        let dim = samples.first().ok_or(StrataError::EmptyDataset)?.len();

        let mut groups: BTreeMap<i32, Vec<&[f64]>> = BTreeMap::new();
        for (sample, &label) in samples.iter().zip(labels) {
            groups.entry(label).or_default().push(sample);
        }

        self.centroids = groups
            .into_iter()
            .map(|(label, rows)| -> Result<(i32, Vec<f64>)> {
                Ok((label, mean_vector(&rows, dim)?))
            })
            .collect::<Result<_>>()?;
        self.dimensions = dim;
        Ok(())
    }

    fn predict(&self, sample: &[f64]) -> Result<i32> {
        if self.centroids.is_empty() {
            return Err(StrataError::ModelNotTrained);
        }
        if sample.len() != self.dimensions {
            return Err(StrataError::DimensionMismatch {
                expected: self.dimensions,
                actual: sample.len(),
            });
        }

        let mut best = (self.centroids[0].0, f64::INFINITY);
        for (label, centroid) in &self.centroids {
            let distance = squared_euclidean(centroid, sample)?;
            if distance < best.1 {
                best = (*label, distance);
            }
        }
        Ok(best.0)
    }

    fn name(&self) -> &str {
        "nearest-centroid"
    }
}
