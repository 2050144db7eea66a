//! Configuration structures for the renaming pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for recibo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReciboConfig {
    /// Directory holding the bills to rename.
    pub input_dir: PathBuf,

    /// Batch renaming configuration.
    pub rename: RenameConfig,
}

impl Default for ReciboConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            rename: RenameConfig::default(),
        }
    }
}

/// Batch renaming configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenameConfig {
    /// File name prefixes marking files as already processed.
    pub skip_prefixes: Vec<String>,

    /// Skip files whose name is already a canonical bill name.
    pub skip_canonical: bool,

    /// Report the renames without touching the filesystem.
    pub dry_run: bool,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            skip_prefixes: vec!["text20".to_string()],
            skip_canonical: true,
            dry_run: false,
        }
    }
}

impl ReciboConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
