//! Validation strategies for classifiers
//!
//! Currently provides stratified holdout validation: a per-class
//! proportional train/validation split followed by accuracy scoring.

pub mod holdout;

pub use self::holdout::*;
