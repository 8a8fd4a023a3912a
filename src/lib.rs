//! Stratified holdout validation for classifiers
//!
//! Splits a labeled dataset into training and validation partitions that
//! keep each class's proportion, trains an injected classifier on one side
//! and reports its accuracy on the other.

pub mod api;
pub mod attribute;
pub mod classifier;
pub mod core;
pub mod data;
pub mod report;
pub mod utils;
pub mod validation;

// Re-export main types for convenience
pub use crate::api::ClassifierKind;
pub use crate::attribute::{Attribute, AttributeKind, NominalAttribute, NumericAttribute};
pub use crate::classifier::{KNearestNeighbors, MajorityClassifier, NearestCentroid};
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::core::{Result, StrataError};
pub use crate::data::{CSVDataset, LibSVMDataset};
pub use crate::report::SerializableReport;
pub use crate::validation::HoldoutValidation;

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
