//! Array helpers used by the validation routines and classifiers

use crate::core::{Result, StrataError};
use std::collections::BTreeMap;

/// Gather `rows[i]` for every `i` in `indices`, keeping the order of `indices`
///
/// # Panics
/// Panics if an index is out of bounds
pub fn select_rows<T: Clone>(rows: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&i| rows[i].clone()).collect()
}

/// Sum of a slice of counts
pub fn sum(values: &[usize]) -> usize {
    values.iter().sum()
}

/// Occurrences of each label, keyed and ordered by label value
pub fn class_counts(labels: &[i32]) -> BTreeMap<i32, usize> {
    let mut counts = BTreeMap::new();
    for &label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
}

/// Label with the highest count; ties go to the smallest label
pub fn argmax_count(counts: &BTreeMap<i32, usize>) -> Option<i32> {
    let mut best: Option<(i32, usize)> = None;
    for (&label, &count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((label, count)),
        }
    }
    best.map(|(label, _)| label)
}

/// Squared Euclidean distance between two vectors of equal length
pub fn squared_euclidean(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(StrataError::DimensionMismatch {
            expected: x.len(),
            actual: y.len(),
        });
    }
    Ok(x.iter().zip(y).map(|(a, b)| (a - b) * (a - b)).sum())
}

/// Component-wise mean of a set of rows of width `dim`
pub fn mean_vector(rows: &[&[f64]], dim: usize) -> Result<Vec<f64>> {
    if rows.is_empty() {
        return Err(StrataError::EmptyDataset);
    }

    let mut mean = vec![0.0; dim];
    for row in rows {
        if row.len() != dim {
            return Err(StrataError::DimensionMismatch {
                expected: dim,
                actual: row.len(),
            });
        }
        for (acc, &v) in mean.iter_mut().zip(row.iter()) {
            *acc += v;
        }
    }

    let n = rows.len() as f64;
    mean.iter_mut().for_each(|v| *v /= n);
    Ok(mean)
}
