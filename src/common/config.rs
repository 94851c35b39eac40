use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global macsweep configuration, loaded from ~/.macsweep/config.toml.
/// Only the CLI reads this; the engine takes every threshold as an
/// explicit argument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default minimum size for large-file scans, in MB
    #[serde(default = "default_large_file_mb")]
    pub large_file_min_mb: u64,

    /// Default minimum size for duplicate scans, in MB
    #[serde(default = "default_duplicate_mb")]
    pub duplicate_min_mb: u64,

    /// How many app-data folders a scan reports
    #[serde(default = "default_app_data_top_n")]
    pub app_data_top_n: usize,

    /// Paths to exclude from scanning (substring match)
    #[serde(default)]
    pub exclude_paths: Vec<String>,
}

fn default_large_file_mb() -> u64 {
    100
}
fn default_duplicate_mb() -> u64 {
    10
}
fn default_app_data_top_n() -> usize {
    crate::catalog::APP_DATA_TOP_N
}

impl Default for Config {
    fn default() -> Self {
        Self {
            large_file_min_mb: default_large_file_mb(),
            duplicate_min_mb: default_duplicate_mb(),
            app_data_top_n: default_app_data_top_n(),
            exclude_paths: Vec::new(),
        }
    }
}

impl Config {
    /// Get the macsweep data directory (~/.macsweep)
    pub fn data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".macsweep")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        Self::data_dir().join("config.toml")
    }

    /// Load config from file, or create default if not exists
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config: {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        let dir = path.parent().unwrap();
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config dir: {}", dir.display()))?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Check if a path should be excluded
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.display().to_string();
        self.exclude_paths.iter().any(|p| path_str.contains(p))
    }
}
