//! Generation config file (`.yaml`, `.yml` or `.json`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::services::synthesizers::{SynthesisOptions, DEFAULT_BUS_CANDIDATES};

pub const DEFAULT_OUTPUT_DIR: &str = "SSDTs";

/// Serializable settings for a `generate` run. Every field is optional on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Schema/config version. This is about the config format, not the tool version.
    #[serde(default = "default_config_version")]
    pub config_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iasl_path: Option<PathBuf>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Fragment names to run; empty means all.
    #[serde(default)]
    pub fragments: Vec<String>,
    #[serde(default = "default_true")]
    pub compile: bool,
    #[serde(default = "default_bus_candidates")]
    pub bus_candidates: Vec<String>,
}

fn default_config_version() -> String {
    "0.1.0".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_true() -> bool {
    true
}

fn default_bus_candidates() -> Vec<String> {
    DEFAULT_BUS_CANDIDATES.iter().map(|s| s.to_string()).collect()
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            config_version: default_config_version(),
            iasl_path: None,
            output_dir: default_output_dir(),
            fragments: Vec::new(),
            compile: true,
            bus_candidates: default_bus_candidates(),
        }
    }
}

impl GenerateConfig {
    pub fn synthesis_options(&self) -> SynthesisOptions {
        if self.bus_candidates.is_empty() {
            return SynthesisOptions::default();
        }
        SynthesisOptions { bus_candidates: self.bus_candidates.clone() }
    }

    /// `None` when every fragment should run.
    pub fn selected_fragments(&self) -> Option<&[String]> {
        if self.fragments.is_empty() {
            None
        } else {
            Some(&self.fragments)
        }
    }
}

/// Load a config, choosing JSON or YAML by extension.
pub fn load_config(path: &Path) -> Result<GenerateConfig> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    let config = if path.extension().and_then(|e| e.to_str()) == Some("json") {
        serde_json::from_slice(&bytes).context("Failed to parse config JSON")?
    } else {
        serde_yaml::from_slice(&bytes).context("Failed to parse config YAML")?
    };
    Ok(config)
}
