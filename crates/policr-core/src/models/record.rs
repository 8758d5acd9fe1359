//! Extraction output models.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schema::FieldSchema;

/// Field name to extracted value, for every field of the schema.
///
/// Keys are exactly the schema's field names in declaration order; absent
/// values are empty strings, never missing keys. Serializes as a flat object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractionResult {
    values: IndexMap<String, String>,
}

impl ExtractionResult {
    /// Result with every schema field present and empty.
    pub fn empty(schema: &FieldSchema) -> Self {
        Self {
            values: schema
                .fields()
                .iter()
                .map(|spec| (spec.name.clone(), String::new()))
                .collect(),
        }
    }

    pub(crate) fn insert(&mut self, name: &str, value: String) {
        self.values.insert(name.to_string(), value);
    }

    /// Value for a field, `None` only when the field is not in the schema.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Iterate `(field, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Field names in schema order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Total number of fields.
    pub fn field_count(&self) -> usize {
        self.values.len()
    }

    /// Number of fields with a non-blank value.
    pub fn filled_count(&self) -> usize {
        self.values.values().filter(|v| !v.trim().is_empty()).count()
    }

    /// Share of filled fields as a percentage rounded to one decimal.
    pub fn completion_rate(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let rate = self.filled_count() as f64 / self.field_count() as f64 * 100.0;
        (rate * 10.0).round() / 10.0
    }

    /// Human-readable completion line, e.g. "Found 3 out of 21 fields (14.3%)".
    pub fn summary(&self) -> String {
        format!(
            "Found {} out of {} fields ({:.1}%)",
            self.filled_count(),
            self.field_count(),
            self.completion_rate()
        )
    }

    /// Borrow the underlying ordered map.
    pub fn as_map(&self) -> &IndexMap<String, String> {
        &self.values
    }

    /// Consume into the underlying ordered map.
    pub fn into_map(self) -> IndexMap<String, String> {
        self.values
    }
}

/// A label located in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelMatch {
    /// Canonical field name.
    pub field: String,
    /// Label variant that matched.
    pub label: String,
    /// Original line index of the label.
    pub line_index: usize,
    /// Character offset of the label within its line.
    pub char_offset: usize,
}

/// Why a field ended up empty, or where its value came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldDiagnostic {
    /// No label variant of the field occurs in the text.
    NotFound { field: String },

    /// A label matched but nothing followed it within the look-ahead.
    NoValue { label: LabelMatch },

    /// A candidate was found but failed its value-shape rule.
    ShapeMismatch { label: LabelMatch, candidate: String },

    /// A value was extracted.
    Extracted { label: LabelMatch, value_line: usize },
}

impl FieldDiagnostic {
    /// Field this diagnostic is about.
    pub fn field(&self) -> &str {
        match self {
            Self::NotFound { field } => field,
            Self::NoValue { label }
            | Self::ShapeMismatch { label, .. }
            | Self::Extracted { label, .. } => &label.field,
        }
    }

    /// Whether the field's value made it into the result.
    pub fn is_extracted(&self) -> bool {
        matches!(self, Self::Extracted { .. })
    }
}

/// Extraction result with per-field diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    /// The complete-keyed result.
    pub result: ExtractionResult,
    /// One diagnostic per schema field, in schema order.
    pub diagnostics: Vec<FieldDiagnostic>,
    /// Number of non-blank lines after normalization.
    pub line_count: usize,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl ExtractionReport {
    /// Human-readable summary line.
    pub fn summary(&self) -> String {
        self.result.summary()
    }
}
