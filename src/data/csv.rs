//! CSV format dataset implementation
//!
//! Supports loading datasets from CSV files where:
//! - The last column is the class, any string
//! - All other columns are numeric features
//! - First row can be headers (automatically detected)
//!
//! Class strings are encoded as dense labels `0..C-1` in order of first
//! appearance.

use crate::attribute::NominalAttribute;
use crate::core::{Dataset, LabeledData, Result, StrataError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Dataset implementation for CSV format files
#[derive(Debug, Clone)]
pub struct CSVDataset {
    data: LabeledData,
    classes: NominalAttribute,
}

impl CSVDataset {
    /// Load a dataset from a CSV file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(StrataError::IoError)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader)
    }

    /// Load a dataset from a reader, detecting a header row
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, true)
    }

    /// Load a dataset from a reader with explicit header option
    pub fn from_reader_with_options<R: BufRead>(
        reader: R,
        auto_detect_header: bool,
    ) -> Result<Self> {
        let mut samples = Vec::new();
        let mut labels = Vec::new();
        let mut classes = NominalAttribute::new("class");
        let mut first_data_line = true;

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(StrataError::IoError)?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if first_data_line {
                first_data_line = false;
                if auto_detect_header && Self::is_header_line(line) {
                    continue;
                }
            }

            let (features, class) = Self::parse_data_line(line)
                .map_err(|e| StrataError::ParseError(format!("line {}: {e}", line_num + 1)))?;

            if let Some(first) = samples.first().map(Vec::len) {
                if features.len() != first {
                    return Err(StrataError::DimensionMismatch {
                        expected: first,
                        actual: features.len(),
                    });
                }
            }

            labels.push(classes.code_of(class)? as i32);
            samples.push(features);
        }

        if samples.is_empty() {
            return Err(StrataError::EmptyDataset);
        }

        Ok(CSVDataset {
            data: LabeledData::new(samples, labels)?,
            classes,
        })
    }

    /// Class names ordered by label
    pub fn class_names(&self) -> &[String] {
        self.classes.values()
    }

    /// Attribute used to encode the class column
    pub fn class_attribute(&self) -> &NominalAttribute {
        &self.classes
    }

    /// Check if a line appears to be a header
    fn is_header_line(line: &str) -> bool {
        let fields: Vec<&str> = line.split(',').collect();

        if fields.len() < 2 {
            return false;
        }

        // Most feature columns non-numeric means a header
        let non_numeric_count = fields
            .iter()
            .take(fields.len() - 1)
            .filter(|field| field.trim().parse::<f64>().is_err())
            .count();

        non_numeric_count > (fields.len() - 1) / 2
    }

    /// Split a data line into its feature vector and class string
    fn parse_data_line(line: &str) -> std::result::Result<(Vec<f64>, &str), String> {
        let fields: Vec<&str> = line.split(',').map(|f| f.trim()).collect();

        if fields.len() < 2 {
            return Err(format!("too few fields: {line}"));
        }

        let class = fields[fields.len() - 1];
        if class.is_empty() {
            return Err("missing class value".to_string());
        }

        let features = fields[..fields.len() - 1]
            .iter()
            .enumerate()
            .map(|(idx, field)| {
                field
                    .parse::<f64>()
                    .map_err(|_| format!("invalid feature value at column {}: {field}", idx + 1))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok((features, class))
    }
}

impl Dataset for CSVDataset {
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
