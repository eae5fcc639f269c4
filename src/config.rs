use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Project-level configuration file, looked up in the working directory.
pub const CONFIG_FILE: &str = "bank-dashboard.json";

/// Environment variable overriding [`DashboardConfig::data_path`].
pub const DATA_PATH_ENV: &str = "BANK_DASHBOARD_DATA";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Dataset loaded at startup.
    pub data_path: PathBuf,
    /// Rows shown in the preview table before "Show all rows" is ticked.
    pub preview_rows: usize,
    /// Initial window size in points.
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("bank-additional-full.csv"),
            preview_rows: 5,
            window_size: [1200.0, 800.0],
        }
    }
}

impl DashboardConfig {
    /// Load configuration with priority (highest first):
    ///
    /// 1. `BANK_DASHBOARD_DATA` for the data path
    /// 2. `./bank-dashboard.json`
    /// 3. Default values
    ///
    /// A config file that fails to parse is logged and skipped.
    pub fn load() -> Self {
        let path = Path::new(CONFIG_FILE);
        let mut config = if path.exists() {
            match Self::from_file(path) {
                Ok(cfg) => cfg,
                Err(e) => {
                    log::warn!("Ignoring config file: {e:#}");
                    Self::default()
                }
            }
        } else {
            Self::default()
        };

        if let Some(data) = std::env::var_os(DATA_PATH_ENV) {
            config.data_path = PathBuf::from(data);
        }
        config
    }

    /// Parse a JSON config file; missing fields fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = DashboardConfig::from_json(r#"{ "preview_rows": 20 }"#).unwrap();
        assert_eq!(cfg.preview_rows, 20);
        assert_eq!(cfg.data_path, PathBuf::from("bank-additional-full.csv"));
        assert_eq!(cfg.window_size, [1200.0, 800.0]);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(DashboardConfig::from_json("{ preview_rows: }").is_err());
    }

    #[test]
    fn reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "data_path": "data/bank.csv" }"#).unwrap();

        let cfg = DashboardConfig::from_file(&path).unwrap();
        assert_eq!(cfg.data_path, PathBuf::from("data/bank.csv"));
        assert_eq!(cfg.preview_rows, 5);
    }
}
