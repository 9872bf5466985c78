// Application configuration.
// Loaded from a JSON file in the platform config dir, with an env override for the service URL.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Env var that overrides `service_url`.
pub const SERVICE_URL_ENV: &str = "CODENEST_SERVICE_URL";

const DEFAULT_SERVICE_URL: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the execution service; `/execute` is appended.
    pub service_url: String,
    /// Request timeout for one run.
    pub timeout_secs: u64,
    /// Directory exports are written to. Current directory when unset.
    pub export_dir: Option<PathBuf>,
    /// `tracing_subscriber::EnvFilter` directive for the log file.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            export_dir: None,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Read config from `path`. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Apply an override for the service URL, ignoring blank values.
    pub fn with_service_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.service_url = url.trim().to_string();
        }
        self
    }

    /// Load from the platform config path and apply the environment override.
    pub fn load() -> Result<Self> {
        let config = match crate::paths::config_path() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        Ok(config.with_service_url_override(std::env::var(SERVICE_URL_ENV).ok()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Directory for exports, defaulting to the working directory.
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
