//! Field schema registry.
//!
//! A schema is an ordered, immutable catalog of [`FieldSpec`]s. Label
//! variants are compiled into [`LabelMatcher`]s once, at construction, so a
//! schema can be shared by any number of concurrent extraction calls.

mod label;
mod motor;

pub use label::LabelMatcher;
pub use motor::motor_insurance;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Default number of lines searched past a label that carries no value.
pub const DEFAULT_LOOK_AHEAD: usize = 1;

/// Expected syntactic form of a field value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueShape {
    /// Any non-empty text.
    #[default]
    None,
    /// A calendar date, reformatted to the configured format.
    Date,
    /// A money amount, symbols and grouping stripped.
    Currency,
    /// An identifier such as a registration or policy number.
    AlphanumericCode,
    /// Human text (names, addresses); placeholders are rejected.
    FreeText,
}

impl ValueShape {
    /// Whether the shape expects digits, enabling confusable repair.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Date | Self::Currency)
    }
}

/// Declaration of one target field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Canonical field name, unique within a schema.
    pub name: String,

    /// Label variants, most specific first.
    pub labels: Vec<String>,

    /// Value-shape rule.
    #[serde(default)]
    pub shape: ValueShape,

    /// How many non-blank lines past a label-only line to search for the
    /// value; blank lines in the input are not counted. 0 disables
    /// look-ahead.
    #[serde(default = "default_look_ahead")]
    pub max_look_ahead: usize,
}

fn default_look_ahead() -> usize {
    DEFAULT_LOOK_AHEAD
}

impl FieldSpec {
    /// Create a free-form field with the given label variants.
    pub fn new<I, S>(name: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            labels: labels.into_iter().map(Into::into).collect(),
            shape: ValueShape::None,
            max_look_ahead: DEFAULT_LOOK_AHEAD,
        }
    }

    /// Set the value-shape rule.
    pub fn with_shape(mut self, shape: ValueShape) -> Self {
        self.shape = shape;
        self
    }

    /// Set the maximum look-ahead distance.
    pub fn with_look_ahead(mut self, lines: usize) -> Self {
        self.max_look_ahead = lines;
        self
    }
}

/// Ordered, validated and precompiled field catalog.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    specs: Vec<FieldSpec>,
    matchers: Vec<Vec<LabelMatcher>>,
}

impl FieldSchema {
    /// Build a schema, validating names and labels.
    pub fn from_specs(specs: Vec<FieldSpec>) -> Result<Self, SchemaError> {
        let mut seen = HashSet::new();
        let mut matchers = Vec::with_capacity(specs.len());

        for spec in &specs {
            if spec.name.trim().is_empty() {
                return Err(SchemaError::EmptyFieldName);
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(SchemaError::DuplicateField(spec.name.clone()));
            }
            if spec.labels.is_empty() {
                return Err(SchemaError::NoLabels(spec.name.clone()));
            }

            let compiled = spec
                .labels
                .iter()
                .map(|label| LabelMatcher::new(&spec.name, label))
                .collect::<Result<Vec<_>, _>>()?;
            matchers.push(compiled);
        }

        Ok(Self { specs, matchers })
    }

    /// Parse a schema from a JSON array of field specs.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let specs: Vec<FieldSpec> =
            serde_json::from_str(json).map_err(|e| SchemaError::Parse(e.to_string()))?;
        Self::from_specs(specs)
    }

    /// Load a schema from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SchemaError::Parse(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    /// Serialize the field specs as pretty JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.specs).unwrap_or_else(|_| "[]".to_string())
    }

    /// Field specs in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.specs
    }

    /// Field specs paired with their compiled label matchers.
    pub fn entries(&self) -> impl Iterator<Item = (&FieldSpec, &[LabelMatcher])> {
        self.specs
            .iter()
            .zip(self.matchers.iter().map(Vec::as_slice))
    }

    /// Look up a field by canonical name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    /// Canonical names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
