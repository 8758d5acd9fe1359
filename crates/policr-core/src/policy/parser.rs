//! Schema-driven policy parser.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::document::read_document;
use crate::error::ExtractionError;
use crate::models::config::PolicrConfig;
use crate::models::record::{ExtractionReport, ExtractionResult, FieldDiagnostic};
use crate::schema::{motor_insurance, FieldSchema};

use super::locator::{locate, Located};
use super::normalize::DocumentText;
use super::rules::ValueNormalizer;
use super::PolicyParser;

/// Extracts the fields of a schema from OCR text.
///
/// The extractor holds only immutable state, so one instance can be shared
/// across threads and reused for any number of documents.
#[derive(Debug, Clone)]
pub struct PolicyExtractor {
    schema: Arc<FieldSchema>,
    values: ValueNormalizer,
}

impl PolicyExtractor {
    /// Create an extractor for `schema` with default value rules.
    pub fn new(schema: Arc<FieldSchema>) -> Self {
        Self {
            schema,
            values: ValueNormalizer::new(),
        }
    }

    /// Extractor for the built-in motor insurance schema.
    pub fn motor() -> Self {
        Self::new(motor_insurance())
    }

    /// Build from configuration, loading a custom schema when one is set.
    ///
    /// Fails on an unreadable schema or an invalid `date_format`.
    pub fn from_config(config: &PolicrConfig) -> crate::Result<Self> {
        let schema = match &config.extraction.schema_path {
            Some(path) => {
                info!("Loading field schema from {}", path.display());
                Arc::new(FieldSchema::from_file(path)?)
            }
            None => motor_insurance(),
        };

        let values = ValueNormalizer::from_config(&config.extraction)?;
        Ok(Self::new(schema).with_values(values))
    }

    /// Replace the value rules.
    pub fn with_values(mut self, values: ValueNormalizer) -> Self {
        self.values = values;
        self
    }

    /// The schema this extractor fills.
    pub fn schema(&self) -> &Arc<FieldSchema> {
        &self.schema
    }

    /// Extract every schema field, with a diagnostic per field.
    ///
    /// Text without a single non-blank line is [`ExtractionError::EmptyInput`],
    /// which still carries the all-empty result.
    pub fn extract_with_report(&self, text: &str) -> Result<ExtractionReport, ExtractionError> {
        let start = Instant::now();

        let document = DocumentText::normalize(text);
        if document.is_empty() {
            return Err(ExtractionError::EmptyInput {
                result: Box::new(ExtractionResult::empty(&self.schema)),
            });
        }

        info!(
            "Extracting {} fields from {} lines of text",
            self.schema.len(),
            document.len()
        );

        let mut result = ExtractionResult::empty(&self.schema);
        let mut diagnostics = Vec::with_capacity(self.schema.len());

        for (spec, matchers) in self.schema.entries() {
            let diagnostic = match locate(spec, matchers, &document) {
                Located::NotFound => FieldDiagnostic::NotFound {
                    field: spec.name.clone(),
                },
                Located::LabelOnly(label) => FieldDiagnostic::NoValue { label },
                Located::Candidate(candidate) => {
                    match self.values.normalize(&candidate.text, spec.shape) {
                        Some(value) => {
                            debug!("Field {} = {:?}", spec.name, value);
                            result.insert(&spec.name, value);
                            FieldDiagnostic::Extracted {
                                label: candidate.label,
                                value_line: candidate.line_index,
                            }
                        }
                        None => {
                            debug!(
                                "Field {}: candidate {:?} rejected as {:?}",
                                spec.name, candidate.text, spec.shape
                            );
                            FieldDiagnostic::ShapeMismatch {
                                label: candidate.label,
                                candidate: candidate.text,
                            }
                        }
                    }
                }
            };
            diagnostics.push(diagnostic);
        }

        let processing_time_ms = start.elapsed().as_millis() as u64;
        let report = ExtractionReport {
            result,
            diagnostics,
            line_count: document.len(),
            processing_time_ms,
        };
        info!("{} in {}ms", report.summary(), processing_time_ms);

        Ok(report)
    }

    /// Extract every schema field.
    pub fn extract(&self, text: &str) -> Result<ExtractionResult, ExtractionError> {
        self.extract_with_report(text).map(|report| report.result)
    }

    /// Read a document and extract every schema field from its text.
    pub fn extract_document(
        &self,
        path: &Path,
        config: &PolicrConfig,
    ) -> crate::Result<ExtractionReport> {
        let text = read_document(path, config)?;
        Ok(self.extract_with_report(&text)?)
    }

    /// Extract from raw bytes that must be UTF-8 text.
    pub fn extract_bytes(&self, bytes: &[u8]) -> Result<ExtractionResult, ExtractionError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| ExtractionError::UndecodableInput(e.to_string()))?;
        self.extract(text)
    }
}

impl Default for PolicyExtractor {
    fn default() -> Self {
        Self::motor()
    }
}

impl PolicyParser for PolicyExtractor {
    fn parse(&self, text: &str) -> Result<ExtractionReport, ExtractionError> {
        self.extract_with_report(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldSpec, ValueShape};
    use pretty_assertions::assert_eq;

    fn small_schema() -> Arc<FieldSchema> {
        Arc::new(
            FieldSchema::from_specs(vec![
                FieldSpec::new("policy_number", ["Policy Number", "Policy No"])
                    .with_shape(ValueShape::AlphanumericCode),
                FieldSpec::new("insured_name", ["Insured Name"]).with_shape(ValueShape::FreeText),
                FieldSpec::new("policy_start_date", ["Start Date"]).with_shape(ValueShape::Date),
                FieldSpec::new("total_premium", ["Total Premium"]).with_shape(ValueShape::Currency),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_extracts_and_orders_fields() {
        let extractor = PolicyExtractor::new(small_schema());
        let result = extractor
            .extract("Total Premium: ₹ 7,080\nPolicy No: PN-2024/001\nInsured Name\nRavi Kumar")
            .unwrap();

        let pairs: Vec<_> = result.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("policy_number", "PN-2024/001"),
                ("insured_name", "Ravi Kumar"),
                ("policy_start_date", ""),
                ("total_premium", "7080"),
            ]
        );
    }

    #[test]
    fn test_empty_input_is_error() {
        let extractor = PolicyExtractor::new(small_schema());
        let empty = Box::new(ExtractionResult::empty(extractor.schema()));
        assert_eq!(
            extractor.extract(""),
            Err(ExtractionError::EmptyInput { result: empty.clone() })
        );

        match extractor.extract(" \n\t\n ") {
            Err(ExtractionError::EmptyInput { result }) => {
                let keys: Vec<_> = result.keys().collect();
                assert_eq!(
                    keys,
                    ["policy_number", "insured_name", "policy_start_date", "total_premium"]
                );
                assert_eq!(result.filled_count(), 0);
            }
            other => panic!("expected EmptyInput, got {:?}", other),
        }
    }

    #[test]
    fn test_undecodable_bytes() {
        let extractor = PolicyExtractor::new(small_schema());
        assert!(matches!(
            extractor.extract_bytes(&[0xff, 0xfe, 0x00]),
            Err(ExtractionError::UndecodableInput(_))
        ));
        assert!(extractor.extract_bytes(b"Insured Name: Asha").is_ok());
    }

    #[test]
    fn test_report_diagnostics() {
        let extractor = PolicyExtractor::new(small_schema());
        let report = extractor
            .extract_with_report("Policy Number: N/A\nInsured Name:\nStart Date: 01/04/2024")
            .unwrap();

        let kinds: Vec<_> = report
            .diagnostics
            .iter()
            .map(|d| match d {
                FieldDiagnostic::NotFound { .. } => "not_found",
                FieldDiagnostic::NoValue { .. } => "no_value",
                FieldDiagnostic::ShapeMismatch { .. } => "shape_mismatch",
                FieldDiagnostic::Extracted { .. } => "extracted",
            })
            .collect();

        // "Insured Name:" takes the next line, which is not a name but is
        // still free text.
        assert_eq!(kinds, ["shape_mismatch", "extracted", "extracted", "not_found"]);
        assert_eq!(report.line_count, 3);
        assert_eq!(report.summary(), "Found 2 out of 4 fields (50.0%)");
    }

    #[test]
    fn test_extract_document() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = PolicyExtractor::new(small_schema());
        let config = PolicrConfig::default();

        let policy = dir.path().join("policy.txt");
        std::fs::write(&policy, "Insured Name: Asha Rao").unwrap();
        let report = extractor.extract_document(&policy, &config).unwrap();
        assert_eq!(report.result.get("insured_name"), Some("Asha Rao"));

        let blank = dir.path().join("blank.txt");
        std::fs::write(&blank, "\n\n").unwrap();
        assert!(matches!(
            extractor.extract_document(&blank, &config),
            Err(crate::PolicrError::Document(crate::DocumentError::EmptyText(_)))
        ));
    }

    #[test]
    fn test_from_config_uses_schema_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, small_schema().to_json()).unwrap();

        let mut config = PolicrConfig::default();
        config.extraction.schema_path = Some(path);

        let extractor = PolicyExtractor::from_config(&config).unwrap();
        assert_eq!(extractor.schema().len(), 4);
    }

    #[test]
    fn test_from_config_rejects_bad_date_format() {
        let mut config = PolicrConfig::default();
        config.extraction.date_format = "%Q".to_string();
        assert!(matches!(
            PolicyExtractor::from_config(&config),
            Err(crate::PolicrError::Config(_))
        ));
    }

    #[test]
    fn test_from_config_default_is_motor() {
        let extractor = PolicyExtractor::from_config(&PolicrConfig::default()).unwrap();
        assert!(Arc::ptr_eq(extractor.schema(), &motor_insurance()));
    }
}
