use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const CONFIG_DIR_NAME: &str = "tracking-synthesis";
const CONFIG_FILE_NAME: &str = "config.toml";
const DATA_DIR_NAME: &str = ".tracking-synthesis";

/// Runtime settings for a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root directory of the class and tracking files. Defaults to `~/.tracking-synthesis`.
    pub data_dir: Option<PathBuf>,
    pub class_id: String,
    /// First day of the school year; anchors the A/B week cycle.
    pub school_year_start: NaiveDate,
    /// Ordered slot ids of a school day.
    pub slots: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            class_id: "default".to_string(),
            school_year_start: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap_or_default(),
            slots: ["M1", "M2", "M3", "M4", "S1", "S2", "S3", "S4"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl AppConfig {
    /// Loads the config file at `path`, or the standard location when `path` is `None`.
    /// A missing standard file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let Some(path) = standard_config_path() else {
                    tracing::debug!("No config directory on this platform, using defaults");
                    return Ok(Self::default());
                };
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    tracing::debug!("No config at {}, using defaults", path.display());
                    Ok(Self::default())
                }
            }
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        tracing::info!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn resolved_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => {
                let home_dir = dirs::home_dir()
                    .ok_or_else(|| anyhow!("Could not determine home directory"))?;
                Ok(home_dir.join(DATA_DIR_NAME))
            }
        }
    }
}

pub fn standard_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
