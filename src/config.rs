//! Configuration Management
//!
//! Handles persistent configuration storage for freshctl. Only the
//! account domain is persisted; the API key is taken from the command
//! line or the environment and never written to disk.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Last used Freshservice domain
    #[serde(default)]
    pub domain: Option<String>,
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("freshctl").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Get effective domain (CLI > config > FRESHSERVICE_DOMAIN env var)
    pub fn effective_domain(&self, cli_domain: Option<&str>) -> Option<String> {
        cli_domain
            .map(str::to_string)
            .or_else(|| self.domain.clone())
            .or_else(|| std::env::var("FRESHSERVICE_DOMAIN").ok())
    }

    /// Set domain and save
    pub fn set_domain(&mut self, domain: &str) -> Result<()> {
        self.domain = Some(domain.to_string());
        self.save()
    }
}
