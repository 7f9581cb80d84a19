//! Configuration management
//!
//! Optional settings live in `~/.git-reflect/config.yaml`. Every key has a
//! default, so a missing file and an empty file behave the same.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "GIT_REFLECT_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Print each question's hint under its prompt.
    pub show_hints: bool,

    /// Staged paths listed when the commit message has to be derived.
    pub staged_summary_limit: usize,

    /// Longest commit message (in characters) stored in an entry.
    pub max_message_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_hints: true,
            staged_summary_limit: 3,
            max_message_length: 200,
        }
    }
}

impl Config {
    /// Loads the config from [`Config::config_path`], or defaults if absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the config from `path`, or defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_saphyr::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Location of the config file.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?
            .join(".git-reflect");

        Ok(config_dir.join("config.yaml"))
    }
}
