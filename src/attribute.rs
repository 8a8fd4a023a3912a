//! Named attributes and the encoding of their values as `f64`
//!
//! Numeric attributes parse their string form directly. Nominal attributes
//! map category strings to integer codes `0..size()` in order of first
//! registration, and are used by the data loaders to turn class names into
//! dense labels.

use crate::core::{Result, StrataError};
use std::collections::HashMap;

/// The type of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// Real-valued attribute
    Numeric,
    /// Categorical attribute defined on a list of unordered values
    Nominal,
}

/// A named variable whose values are stored as `f64`
pub trait Attribute {
    fn kind(&self) -> AttributeKind;

    fn name(&self) -> &str;

    fn description(&self) -> Option<&str>;

    /// Weight of the attribute, 1.0 unless set otherwise
    fn weight(&self) -> f64;

    /// Encode a string value
    fn value_of(&mut self, s: &str) -> Result<f64>;

    /// Decode a stored value. `None` marks a missing value where the
    /// attribute has no string form for it.
    fn format_value(&self, x: f64) -> Result<Option<String>>;

    /// Two attributes match when kind, name and description agree
    fn same_as(&self, other: &dyn Attribute) -> bool {
        self.kind() == other.kind()
            && self.name() == other.name()
            && self.description() == other.description()
    }
}

/// Real-valued attribute
#[derive(Debug, Clone, PartialEq)]
pub struct NumericAttribute {
    name: String,
    description: Option<String>,
    weight: f64,
}

impl NumericAttribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            weight: 1.0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

impl Attribute for NumericAttribute {
    fn kind(&self) -> AttributeKind {
        AttributeKind::Numeric
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn value_of(&mut self, s: &str) -> Result<f64> {
        s.trim().parse::<f64>().map_err(|_| {
            StrataError::ParseError(format!("Invalid value for attribute '{}': {s}", self.name))
        })
    }

    fn format_value(&self, x: f64) -> Result<Option<String>> {
        Ok(Some(x.to_string()))
    }
}

/// Categorical attribute with an open or closed vocabulary.
///
/// An open attribute registers unseen strings on `value_of`, giving each the
/// next free code. A closed attribute rejects them.
#[derive(Debug, Clone, PartialEq)]
pub struct NominalAttribute {
    name: String,
    description: Option<String>,
    weight: f64,
    open: bool,
    values: Vec<String>,
    codes: HashMap<String, usize>,
}

impl NominalAttribute {
    /// Open attribute with an empty vocabulary
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            weight: 1.0,
            open: true,
            values: Vec::new(),
            codes: HashMap::new(),
        }
    }

    /// Closed attribute over a fixed vocabulary; `values[i]` gets code `i`.
    ///
    /// Duplicate values are rejected.
    pub fn with_values<S: AsRef<str>>(name: impl Into<String>, values: &[S]) -> Result<Self> {
        let mut attribute = Self::new(name);
        for value in values {
            let value = value.as_ref();
            if attribute.codes.contains_key(value) {
                return Err(StrataError::InvalidParameter(format!(
                    "Duplicate nominal value: {value}"
                )));
            }
            attribute.register(value);
        }
        attribute.open = false;
        Ok(attribute)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Number of known values
    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Known values ordered by code
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Integer code of a string, registering it if the vocabulary is open
    pub fn code_of(&mut self, s: &str) -> Result<usize> {
        if let Some(&code) = self.codes.get(s) {
            return Ok(code);
        }
        if !self.open {
            return Err(StrataError::ParseError(format!(
                "Invalid value for nominal attribute '{}': {s}",
                self.name
            )));
        }
        Ok(self.register(s))
    }

    fn register(&mut self, s: &str) -> usize {
        let code = self.values.len();
        self.values.push(s.to_string());
        self.codes.insert(s.to_string(), code);
        code
    }
}

impl Attribute for NominalAttribute {
    fn kind(&self) -> AttributeKind {
        AttributeKind::Nominal
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn value_of(&mut self, s: &str) -> Result<f64> {
        self.code_of(s).map(|code| code as f64)
    }

    fn format_value(&self, x: f64) -> Result<Option<String>> {
        if x.is_nan() {
            return Ok(None);
        }
        if x.floor() != x {
            return Err(StrataError::InvalidParameter(format!(
                "Nominal value is not an integer: {x}"
            )));
        }
        if x < 0.0 || x >= self.values.len() as f64 {
            return Err(StrataError::InvalidParameter(format!(
                "Invalid nominal value: {x}"
            )));
        }
        Ok(Some(self.values[x as usize].clone()))
    }
}
