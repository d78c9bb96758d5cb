//! depot.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepotConfig {
    pub store: StoreConfig,
    pub report: Option<ReportConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the redb database file.
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Capacity bucket spec for utilization reports, e.g. "0-50,51-150,151-".
    pub buckets: Option<String>,
}

impl DepotConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str_content(&content)
    }

    pub fn from_str_content(content: &str) -> anyhow::Result<Self> {
        let config: DepotConfig = toml::from_str(content)?;
        Ok(config)
    }
}
