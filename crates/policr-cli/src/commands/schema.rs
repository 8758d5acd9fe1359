//! Schema command - print the active field schema.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use policr_core::PolicyExtractor;

use super::{load_config, with_schema};

/// Arguments for the schema command.
#[derive(Args)]
pub struct SchemaArgs {
    /// Write the schema JSON to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Schema file to validate and print instead of the configured one
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Print only the field names, one per line
    #[arg(long)]
    names: bool,
}

pub async fn run(args: SchemaArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = with_schema(load_config(config_path)?, args.schema);
    let extractor = PolicyExtractor::from_config(&config)?;
    let schema = extractor.schema();

    let content = if args.names {
        schema.names().collect::<Vec<_>>().join("\n")
    } else {
        schema.to_json()
    };

    match &args.output {
        Some(output_path) => {
            fs::write(output_path, &content)?;
            println!(
                "{} Wrote {} fields to {}",
                style("✓").green(),
                schema.len(),
                output_path.display()
            );
        }
        None => println!("{}", content),
    }

    Ok(())
}
