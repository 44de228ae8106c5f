use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;
use strum::{Display, EnumString};
use thiserror::Error;

use crate::metadata::local::SIMULATED_DELAY;
use crate::metadata::remote::DEFAULT_API_URL;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Deployment mode read from `APP_ENV`. Only the exact value `production`
/// selects production; anything else is development.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    Production,
    #[default]
    Development,
}

impl DeploymentMode {
    pub fn from_env_value(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub mode: DeploymentMode,
    pub api_key: Option<String>,
    pub api_url: String,
    pub simulated_delay: Duration,
    pub server_host: String,
    pub server_port: u16,
    pub resume_config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mode: DeploymentMode::Development,
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            simulated_delay: SIMULATED_DELAY,
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
            resume_config_path: None,
        }
    }
}

impl Config {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        let server_port = match get("SERVER_PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "SERVER_PORT",
                value,
                expected: "a port number",
            })?,
            None => defaults.server_port,
        };

        let simulated_delay = match get("LINK_PREVIEW_DELAY_MS") {
            Some(value) => value
                .trim()
                .parse()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::Invalid {
                    key: "LINK_PREVIEW_DELAY_MS",
                    value,
                    expected: "a whole number of milliseconds",
                })?,
            None => defaults.simulated_delay,
        };

        Ok(Config {
            mode: DeploymentMode::from_env_value(get("APP_ENV").as_deref()),
            api_key: get("LINK_PREVIEW_API_KEY"),
            api_url: get("LINK_PREVIEW_API_URL").unwrap_or(defaults.api_url),
            simulated_delay,
            server_host: get("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port,
            resume_config_path: get("RESUME_CONFIG_PATH").map(PathBuf::from),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn is_production(&self) -> bool {
        self.mode == DeploymentMode::Production
    }
}
