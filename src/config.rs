//! Runtime configuration
//!
//! Settings come from built-in defaults, then an optional TOML file at
//! `$XDG_CONFIG_HOME/notas/config.toml`, then `NOTAS_*` environment variables.
//! CLI flags are applied last by the binary.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_FILENAME: &str = "config.toml";
const DEFAULT_LOOKUP_URL: &str = "https://query2.finance.yahoo.com/v1/finance/search";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct NotasConfig {
    pub lookup: LookupConfig,
}

/// Symbol lookup settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LookupConfig {
    pub base_url: String,
    /// Upper bound for each lookup request
    pub timeout_secs: u64,
    pub user_agent: String,
    pub region: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LOOKUP_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            region: "Brazil".to_string(),
        }
    }
}

pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dir_spec::config_home)
        .ok_or_else(|| anyhow!("Could not determine config directory"))?;
    Ok(config_dir.join("notas"))
}

impl NotasConfig {
    /// Load the config file (if any) and apply environment overrides
    pub fn load() -> Result<Self> {
        let path = get_config_dir()?.join(CONFIG_FILENAME);
        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            debug!("No config file at {:?}, using defaults", path);
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config file {:?}", path))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn apply_env<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = var("NOTAS_LOOKUP_URL") {
            self.lookup.base_url = url;
        }
        if let Some(secs) = var("NOTAS_LOOKUP_TIMEOUT_SECS") {
            self.lookup.timeout_secs = secs
                .trim()
                .parse()
                .with_context(|| format!("NOTAS_LOOKUP_TIMEOUT_SECS is not a number: {}", secs))?;
        }
        Ok(())
    }
}
