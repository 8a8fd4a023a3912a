//! Error types for holdout validation

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StrataError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid label {label} at index {index}: {reason}")]
    InvalidLabel {
        label: i32,
        index: usize,
        reason: String,
    },

    #[error("Validation partition is empty, accuracy is undefined")]
    EmptyValidationSet,

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Empty dataset")]
    EmptyDataset,

    #[error("Model not trained")]
    ModelNotTrained,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, StrataError>;
