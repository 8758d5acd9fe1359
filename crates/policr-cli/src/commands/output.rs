//! Rendering extraction results for the terminal and files.

use policr_core::{ExtractionReport, ExtractionResult, FieldDiagnostic};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON object keyed by field name
    Json,
    /// CSV with a header row of field names
    Csv,
    /// Plain text, one field per line
    Text,
}

impl OutputFormat {
    /// File extension for per-document outputs.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn format_result(
    result: &ExtractionResult,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(result.keys())?;
    wtr.write_record(result.iter().map(|(_, value)| value))?;
    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn format_text(result: &ExtractionResult) -> String {
    let width = result.keys().map(|k| k.len()).max().unwrap_or(0);
    let mut output = String::new();

    for (field, value) in result.iter() {
        let value = if value.is_empty() { "Not found" } else { value };
        output.push_str(&format!("{:<width$}  {}\n", field, value, width = width));
    }

    output.push('\n');
    output.push_str(&result.summary());
    output.push('\n');
    output
}

/// One line per field explaining where its value came from or why it is
/// empty.
pub fn format_diagnostics(report: &ExtractionReport) -> String {
    let mut output = String::new();

    for diagnostic in &report.diagnostics {
        let line = match diagnostic {
            FieldDiagnostic::NotFound { field } => format!("{}: no label found", field),
            FieldDiagnostic::NoValue { label } => format!(
                "{}: label {:?} on line {} has no value",
                label.field,
                label.label,
                label.line_index + 1
            ),
            FieldDiagnostic::ShapeMismatch { label, candidate } => format!(
                "{}: {:?} after label {:?} on line {} was rejected",
                label.field,
                candidate,
                label.label,
                label.line_index + 1
            ),
            FieldDiagnostic::Extracted { label, value_line } => format!(
                "{}: label {:?} on line {}, value on line {}",
                label.field,
                label.label,
                label.line_index + 1,
                value_line + 1
            ),
        };
        output.push_str(&line);
        output.push('\n');
    }

    output.push_str(&format!(
        "{} ({} lines, {}ms)\n",
        report.summary(),
        report.line_count,
        report.processing_time_ms
    ));
    output
}
