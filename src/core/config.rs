use crate::core::maturity::MaturityKey;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://sdw-wsrest.ecb.europa.eu/service/data";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct EcbProviderConfig {
    pub base_url: String,
}

impl Default for EcbProviderConfig {
    fn default() -> Self {
        EcbProviderConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChartConfig {
    pub width: u16,
    pub height: u16,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            width: 100,
            height: 25,
        }
    }
}

fn default_maturities() -> Vec<MaturityKey> {
    MaturityKey::ALL.to_vec()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub provider: EcbProviderConfig,
    #[serde(default = "default_maturities")]
    pub maturities: Vec<MaturityKey>,
    #[serde(default)]
    pub chart: ChartConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            provider: EcbProviderConfig::default(),
            maturities: default_maturities(),
            chart: ChartConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the default config file, falling back to built-in defaults when
    /// it does not exist.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("eu", "euribor", "euribor")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
