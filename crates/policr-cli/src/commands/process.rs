//! Process command - extract fields from a single policy document.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::ProgressBar;
use tracing::{debug, info};

use policr_core::{read_document, DocumentError, ExtractionError, PolicyExtractor, PolicrConfig};

use super::output::{format_diagnostics, format_result, OutputFormat};
use super::{load_config, with_schema};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input document (txt, PDF or image), or "-" to read OCR text from stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Print per-field diagnostics to stderr
    #[arg(long)]
    report: bool,

    /// Field schema JSON file (default: built-in motor schema)
    #[arg(short, long)]
    schema: Option<PathBuf>,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = with_schema(load_config(config_path)?, args.schema.clone());
    let extractor = PolicyExtractor::from_config(&config)?;

    let text = if args.input.as_os_str() == "-" {
        read_stdin()?
    } else {
        read_input(&args.input, &config)?
    };

    let report = match extractor.extract_with_report(&text) {
        Ok(report) => report,
        Err(ExtractionError::EmptyInput { result }) => {
            emit(&format_result(&result, args.format, args.pretty)?, args.output.as_deref())?;
            anyhow::bail!("No text to extract from in {}", args.input.display());
        }
        Err(e) => return Err(e.into()),
    };

    if args.report {
        eprint!("{}", format_diagnostics(&report));
    }

    emit(&format_result(&report.result, args.format, args.pretty)?, args.output.as_deref())?;

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Write formatted output to `output_path`, or stdout when unset.
fn emit(output: &str, output_path: Option<&Path>) -> anyhow::Result<()> {
    match output_path {
        Some(path) => {
            fs::write(path, output)?;
            println!("{} Output written to {}", style("✓").green(), path.display());
        }
        None => {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}

fn read_input(path: &Path, config: &PolicrConfig) -> anyhow::Result<String> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    info!("Processing file: {}", path.display());

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Reading {}", path.display()));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let text = read_document(path, config);
    pb.finish_and_clear();

    match text {
        // Reported like empty stdin, with every field empty.
        Err(DocumentError::EmptyText(_)) => Ok(String::new()),
        other => Ok(other?),
    }
}

fn read_stdin() -> anyhow::Result<String> {
    let mut bytes = Vec::new();
    std::io::stdin().read_to_end(&mut bytes)?;
    debug!("Read {} bytes from stdin", bytes.len());

    let text = String::from_utf8(bytes).map_err(|e| ExtractionError::UndecodableInput(e.to_string()))?;
    Ok(text)
}
