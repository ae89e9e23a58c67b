//! Application configuration management.
//!
//! The configuration holds endpoint locations only; account data (username,
//! password, VIN) and the session token live in the item store.
//!
//! Configuration is read from `~/.config/connecteddrive/config.json` when it
//! exists, then individual values can be overridden from the environment.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Application name used for the config directory path
const APP_NAME: &str = "connecteddrive";

/// Config file name
const CONFIG_FILE: &str = "config.json";

const ENV_STORE_URL: &str = "CONNECTEDDRIVE_STORE_URL";
const ENV_AUTH_URL: &str = "CONNECTEDDRIVE_AUTH_URL";
const ENV_VEHICLE_API_URL: &str = "CONNECTEDDRIVE_VEHICLE_API_URL";

/// openHAB running on the same host
pub const DEFAULT_STORE_URL: &str = "http://localhost:8080";

pub const DEFAULT_AUTH_URL: &str = "https://customer.bmwgroup.com/gcdm/oauth/authenticate";

pub const DEFAULT_VEHICLE_API_URL: &str = "https://www.bmw-connecteddrive.de/api/vehicle";

/// The portal rejects requests without a browser user agent.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:57.0) Gecko/20100101 Firefox/57.0";

/// HTTP request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store_url: String,
    pub auth_url: String,
    pub vehicle_api_url: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_url: DEFAULT_STORE_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            vehicle_api_url: DEFAULT_VEHICLE_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load the config file (if any) and apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                debug!(path = %path.display(), "Loading config file");
                let contents = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                Self::from_json(&contents)?
            }
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).context("Failed to parse config file")
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_STORE_URL) {
            self.store_url = url;
        }
        if let Some(url) = lookup(ENV_AUTH_URL) {
            self.auth_url = url;
        }
        if let Some(url) = lookup(ENV_VEHICLE_API_URL) {
            self.vehicle_api_url = url;
        }
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
