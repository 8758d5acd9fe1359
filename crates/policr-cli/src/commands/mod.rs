//! Subcommands and helpers shared between them.

pub mod batch;
pub mod config;
pub mod output;
pub mod process;
pub mod schema;

use std::path::{Path, PathBuf};

use tracing::debug;

use policr_core::PolicrConfig;

/// Load the configuration named on the command line, else the user's
/// config file when one exists, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PolicrConfig> {
    if let Some(path) = config_path {
        debug!("Loading config from {}", path);
        return Ok(PolicrConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        return Ok(PolicrConfig::from_file(&default_path)?);
    }

    Ok(PolicrConfig::default())
}

/// Apply a `--schema` override to a loaded configuration.
pub fn with_schema(mut config: PolicrConfig, schema: Option<PathBuf>) -> PolicrConfig {
    if schema.is_some() {
        config.extraction.schema_path = schema;
    }
    config
}
