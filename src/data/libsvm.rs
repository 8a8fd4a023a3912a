//! LibSVM format dataset implementation
//!
//! Supports loading datasets in the libsvm format:
//! label index:value index:value ...
//!
//! Example:
//! 0 1:0.5 3:1.2 7:0.8
//! 2 2:0.3 5:2.1
//!
//! Labels are integers. Feature indices are 1-based; rows are expanded to
//! dense vectors of the largest index seen, missing entries being zero.
//! Indices above [`MAX_FEATURE_INDEX`] are rejected, as are files whose
//! dense expansion would exceed [`MAX_DENSE_VALUES`] entries.

use crate::attribute::NominalAttribute;
use crate::core::{Dataset, LabeledData, Result, StrataError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Dataset implementation for LibSVM format files
#[derive(Debug, Clone)]
pub struct LibSVMDataset {
    data: LabeledData,
    label_names: Option<NominalAttribute>,
}

/// Largest accepted 1-based feature index
pub const MAX_FEATURE_INDEX: usize = 1 << 20;

/// Upper bound on `rows * dimensions` after dense expansion
pub const MAX_DENSE_VALUES: usize = 1 << 28;

type SparseRow = (i32, Vec<(usize, f64)>);

impl LibSVMDataset {
    /// Load a dataset from a LibSVM format file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(StrataError::IoError)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader)
    }

    /// Load a dataset from a reader (for testing and flexibility)
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut rows: Vec<SparseRow> = Vec::new();
        let mut dimensions = 0;

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(StrataError::IoError)?;
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match Self::parse_line(line) {
                Ok((row, max_idx)) => {
                    if let Some(max_idx) = max_idx {
                        dimensions = dimensions.max(max_idx + 1);
                    }
                    rows.push(row);
                }
                Err(e) => {
                    return Err(StrataError::ParseError(format!(
                        "Error parsing line {}: {}",
                        line_num + 1,
                        e
                    )));
                }
            }
        }

        if rows.is_empty() {
            return Err(StrataError::EmptyDataset);
        }

        match rows.len().checked_mul(dimensions) {
            Some(total) if total <= MAX_DENSE_VALUES => {}
            _ => {
                return Err(StrataError::ParseError(format!(
                    "{} rows of {} features exceed the limit of {} dense values",
                    rows.len(),
                    dimensions,
                    MAX_DENSE_VALUES
                )));
            }
        }

        let mut samples = Vec::with_capacity(rows.len());
        let mut labels = Vec::with_capacity(rows.len());
        for (label, entries) in rows {
            let mut dense = vec![0.0; dimensions];
            for (index, value) in entries {
                dense[index] = value;
            }
            samples.push(dense);
            labels.push(label);
        }

        Ok(LibSVMDataset {
            data: LabeledData::new(samples, labels)?,
            label_names: None,
        })
    }

    /// Re-code labels densely as `0..C-1` in order of first appearance.
    ///
    /// Binary files labelled `-1`/`+1` need this before holdout validation.
    /// The original labels stay available through `label_names()`.
    pub fn encode_labels(self) -> Result<Self> {
        let mut names = NominalAttribute::new("label");
        let (samples, raw) = self.data.into_parts();
        let labels = raw
            .iter()
            .map(|label| names.code_of(&label.to_string()).map(|code| code as i32))
            .collect::<Result<Vec<_>>>()?;

        Ok(LibSVMDataset {
            data: LabeledData::new(samples, labels)?,
            label_names: Some(names),
        })
    }

    /// Original label values ordered by code, if labels were re-coded
    pub fn label_names(&self) -> Option<&[String]> {
        self.label_names.as_ref().map(|names| names.values())
    }

    /// Parse a single line; returns the row and its largest 0-based index
    fn parse_line(line: &str) -> Result<(SparseRow, Option<usize>)> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        if parts.is_empty() {
            return Err(StrataError::ParseError("Empty line".to_string()));
        }

        let label = parts[0]
            .parse::<i32>()
            .map_err(|_| StrataError::ParseError(format!("Invalid label: {}", parts[0])))?;

        let mut entries = Vec::with_capacity(parts.len() - 1);
        let mut max_index = None;

        for feature_str in &parts[1..] {
            let (index, value) = feature_str.split_once(':').ok_or_else(|| {
                StrataError::ParseError(format!("Invalid feature format: {feature_str}"))
            })?;

            let index = index.parse::<usize>().map_err(|_| {
                StrataError::ParseError(format!("Invalid feature index: {index}"))
            })?;

            let value = value.parse::<f64>().map_err(|_| {
                StrataError::ParseError(format!("Invalid feature value: {value}"))
            })?;

            // libsvm uses 1-based indexing, convert to 0-based
            if index == 0 {
                return Err(StrataError::ParseError(
                    "Feature index must be positive: 0".to_string(),
                ));
            }
            if index > MAX_FEATURE_INDEX {
                return Err(StrataError::ParseError(format!(
                    "Feature index {index} exceeds the limit of {MAX_FEATURE_INDEX}"
                )));
            }
            let zero_based_index = index - 1;

            entries.push((zero_based_index, value));
            max_index = max_index.max(Some(zero_based_index));
        }

        Ok(((label, entries), max_index))
    }
}

impl Dataset for LibSVMDataset {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn dim(&self) -> usize {
        self.data.dim()
    }

    fn samples(&self) -> &[Vec<f64>] {
        self.data.samples()
    }

    fn labels(&self) -> &[i32] {
        self.data.labels()
    }
}
