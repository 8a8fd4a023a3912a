//! Core traits for holdout validation

use crate::core::Result;

/// Dataset abstraction: row-major feature vectors paired with integer labels
pub trait Dataset {
    /// Number of samples in the dataset
    fn len(&self) -> usize;

    /// Number of features (dimensionality)
    fn dim(&self) -> usize;

    /// All feature vectors, in dataset order
    fn samples(&self) -> &[Vec<f64>];

    /// All labels, parallel to `samples()`
    fn labels(&self) -> &[i32];

    /// Get a single feature vector by index
    ///
    /// # Panics
    /// Panics if index >= len()
    fn sample(&self, i: usize) -> &[f64] {
        &self.samples()[i]
    }

    /// Check if the dataset is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Trainable predictor consumed by the validation routines.
///
/// `train` is called exactly once per evaluation, before any call to
/// `predict`. Predictions must reflect the most recent `train` call.
pub trait Classifier {
    /// Fit the model on the given rows and their labels
    fn train(&mut self, samples: &[Vec<f64>], labels: &[i32]) -> Result<()>;

    /// Predict the label of a single feature vector
    fn predict(&self, sample: &[f64]) -> Result<i32>;

    /// Predict several feature vectors
    fn predict_batch(&self, samples: &[Vec<f64>]) -> Result<Vec<i32>> {
        samples.iter().map(|s| self.predict(s)).collect()
    }

    /// Human readable name of the model
    fn name(&self) -> &str {
        "classifier"
    }
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn train(&mut self, samples: &[Vec<f64>], labels: &[i32]) -> Result<()> {
        (**self).train(samples, labels)
    }

    fn predict(&self, sample: &[f64]) -> Result<i32> {
        (**self).predict(sample)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
