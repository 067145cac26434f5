//! Application configuration.
//!
//! Read from `poforge.json` in the working directory when present; every field
//! is optional and falls back to its default.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use poforge_observability::LogFormat;
use poforge_purchasing::{SupplierDirectory, DEFAULT_LOCATION};

pub const CONFIG_FILE: &str = "poforge.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Directory export files are written to.
    pub output_dir: PathBuf,
    /// Location used when an `add` line leaves it out.
    pub default_location: String,
    pub log_format: LogFormat,
    /// Seeded supplier map: display name -> code.
    pub suppliers: BTreeMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            default_location: DEFAULT_LOCATION.to_string(),
            log_format: LogFormat::default(),
            suppliers: SupplierDirectory::default_entries()
                .iter()
                .map(|(name, code)| (name.to_string(), code.to_string()))
                .collect(),
        }
    }
}

impl AppConfig {
    /// Load `dir/poforge.json`, or defaults if the file does not exist.
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut config: AppConfig = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))?;

        // Relative output directories are resolved against the config file.
        if config.output_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.output_dir = parent.join(&config.output_dir);
            }
        }
        Ok(config)
    }

    /// Supplier map for a new session. Entries with a blank name or code are dropped.
    pub fn supplier_directory(&self) -> SupplierDirectory {
        self.suppliers.iter().collect()
    }
}
