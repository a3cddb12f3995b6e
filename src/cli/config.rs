//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::export::{DEFAULT_RETENTION, DEFAULT_STATUSES};
use crate::infra::PublicUrls;

/// Directory name used when neither the CLI nor the config file sets one.
const DEFAULT_WORKING_DIR: &str = "markdown-exports";

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory exported files are written to
    pub working_dir: Option<PathBuf>,

    /// Public URL that serves the working directory
    pub public_base_url: Option<String>,

    /// Age in seconds after which exported files are purged
    pub retention_secs: Option<u64>,

    /// Statuses included by taxonomy and "all" exports
    pub statuses: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, or defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/mdexport/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mdexport")
            .join("config.toml")
    }

    /// Resolve the working directory, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--dir` argument
    /// 2. Config file `working_dir` setting
    /// 3. `./markdown-exports`
    pub fn working_dir(&self, cli_dir: Option<&PathBuf>) -> PathBuf {
        cli_dir
            .cloned()
            .or_else(|| self.working_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_WORKING_DIR))
    }

    pub fn retention(&self) -> Duration {
        self.retention_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_RETENTION)
    }

    pub fn statuses(&self) -> Vec<String> {
        match &self.statuses {
            Some(statuses) => statuses.clone(),
            None => DEFAULT_STATUSES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Builds the public URL mapping for `working_dir`, if a base URL is set.
    pub fn public_urls(&self, working_dir: &Path) -> Result<Option<PublicUrls>> {
        let Some(raw) = &self.public_base_url else {
            return Ok(None);
        };
        let url = Url::parse(raw).with_context(|| format!("invalid public_base_url: {raw}"))?;
        Ok(Some(PublicUrls::new(working_dir, url)))
    }
}
