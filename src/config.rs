//! Configuration file support for depsnap.
//!
//! Provides YAML-based configuration through `depsnap.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use crate::application::dto::OutputFormat;
use crate::shared::Result;
use crate::snapshot_engine::filters::FilterPipeline;

pub const CONFIG_FILENAME: &str = "depsnap.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub show_hidden: Option<bool>,
    pub fail_on_unresolved: Option<bool>,
    pub disabled_filters: Option<Vec<String>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// Parsed `format`; only valid after `validate_config` passed
    pub fn output_format(&self) -> Option<OutputFormat> {
        self.format
            .as_deref()
            .and_then(|format| OutputFormat::from_str(format).ok())
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    tracing::debug!(path = %path.display(), "Loaded config file");
    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(format) = &config.format {
        if let Err(message) = OutputFormat::from_str(format) {
            bail!("Invalid config: {}", message);
        }
    }

    if let Some(disabled_filters) = &config.disabled_filters {
        for (i, name) in disabled_filters.iter().enumerate() {
            if name.trim().is_empty() {
                bail!(
                    "Invalid config: disabled_filters[{}] must not be empty.\n\n\
                     💡 Hint: Use one of: {}",
                    i,
                    FilterPipeline::STANDARD_FILTER_NAMES.join(", ")
                );
            }
            if !FilterPipeline::STANDARD_FILTER_NAMES
                .iter()
                .any(|known| *known == name.as_str())
            {
                bail!(
                    "Invalid config: unknown filter '{}' in disabled_filters.\n\n\
                     💡 Hint: Use one of: {}",
                    name,
                    FilterPipeline::STANDARD_FILTER_NAMES.join(", ")
                );
            }
        }
    }
    Ok(())
}

fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        tracing::warn!(field = %key, "Unknown config field will be ignored");
        eprintln!("⚠️  Warning: Unknown config field '{}' will be ignored.", key);
    }
}
