//! Batch processing command for multiple policy documents.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use policr_core::{DocumentKind, ExtractionResult, FieldSchema, PolicyExtractor, PolicrConfig};

use super::output::{format_result, OutputFormat};
use super::{load_config, with_schema};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching input documents
    #[arg(required = true)]
    input: String,

    /// Output directory for per-document results
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each document
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also write a summary CSV with one column per field
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Field schema JSON file (default: built-in motor schema)
    #[arg(short, long)]
    schema: Option<PathBuf>,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    result: Option<ExtractionResult>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = Arc::new(with_schema(load_config(config_path)?, args.schema.clone()));
    let extractor = Arc::new(PolicyExtractor::from_config(&config)?);

    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file() && DocumentKind::from_path(p).is_some())
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));
    let handles: Vec<_> = files
        .into_iter()
        .map(|path| {
            let semaphore = Arc::clone(&semaphore);
            let extractor = Arc::clone(&extractor);
            let config = Arc::clone(&config);
            let pb = overall_pb.clone();

            tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await?;
                let file_start = Instant::now();
                let task_path = path.clone();
                let outcome = tokio::task::spawn_blocking(move || {
                    process_single_file(&task_path, &extractor, &config)
                })
                .await?;
                pb.inc(1);

                let processing_time_ms = file_start.elapsed().as_millis() as u64;
                anyhow::Ok(match outcome {
                    Ok(result) => ProcessResult {
                        path,
                        result: Some(result),
                        error: None,
                        processing_time_ms,
                    },
                    Err(e) => ProcessResult {
                        path,
                        result: None,
                        error: Some(e.to_string()),
                        processing_time_ms,
                    },
                })
            })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let result = handle.await??;
        if let Some(error_msg) = &result.error {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), error_msg);
            } else {
                error!("Failed to process {}: {}", result.path.display(), error_msg);
                overall_pb.abandon();
                anyhow::bail!("Processing failed for {}: {}", result.path.display(), error_msg);
            }
        }
        results.push(result);
    }

    overall_pb.finish_and_clear();

    let successful: Vec<_> = results.iter().filter(|r| r.result.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    for item in &successful {
        let Some(result) = &item.result else {
            continue;
        };
        match &args.output_dir {
            Some(output_dir) => {
                let output_name = item
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("policy");
                let output_path =
                    output_dir.join(format!("{}.{}", output_name, args.format.extension()));

                fs::write(&output_path, format_result(result, args.format, true)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
            None => {
                println!("  {}: {}", item.path.display(), result.summary());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, extractor.schema(), &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(
    path: &Path,
    extractor: &PolicyExtractor,
    config: &PolicrConfig,
) -> anyhow::Result<ExtractionResult> {
    let report = extractor.extract_document(path, config)?;
    debug!("{}: {}", path.display(), report.summary());
    Ok(report.result)
}

fn write_summary(
    path: &Path,
    schema: &FieldSchema,
    results: &[ProcessResult],
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["filename", "status"];
    header.extend(schema.names());
    header.extend(["completion_rate", "processing_time_ms", "error"]);
    wtr.write_record(&header)?;

    for item in results {
        let filename = item
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();

        let mut record = vec![filename];
        match &item.result {
            Some(result) => {
                record.push("success".to_string());
                record.extend(schema.names().map(|name| result.get(name).unwrap_or("").to_string()));
                record.push(format!("{:.1}", result.completion_rate()));
            }
            None => {
                record.push("error".to_string());
                record.extend(schema.names().map(|_| String::new()));
                record.push(String::new());
            }
        }
        record.push(item.processing_time_ms.to_string());
        record.push(item.error.clone().unwrap_or_default());
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
