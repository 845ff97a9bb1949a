use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerkskraConfig {
    /// Web-app URL of the spreadsheet mirror (Apps Script deployment).
    #[serde(default)]
    pub script_url: Option<String>,
    /// Mirror mutations to the spreadsheet when true.
    #[serde(default)]
    pub sync_enabled: bool,
}

impl VerkskraConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("verkskra")
            .join("config.toml"))
    }

    /// Load config from disk. Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)?;
        Ok(())
    }

    /// Effective script URL: the environment wins over the config file.
    pub fn effective_script_url(&self) -> Option<String> {
        std::env::var("VERKSKRA_SCRIPT_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .or_else(|| self.script_url.clone())
    }
}
