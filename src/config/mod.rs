//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/locmatch/config.toml
//!
//! The Google API key can always be supplied via the `GOOGLE_API_KEY`
//! environment variable, which takes precedence over the config file.

pub mod defaults;

use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream geocoding service settings
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Reference location settings
    #[serde(default)]
    pub reference: ReferenceConfig,

    /// API keys for external services
    #[serde(default)]
    pub api_keys: ApiKeysConfig,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Upstream geocoding service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Network-based geolocation endpoint
    #[serde(default = "default_geolocation_url")]
    pub geolocation_url: String,

    /// Forward/reverse geocoding endpoint
    #[serde(default = "default_geocode_url")]
    pub geocode_url: String,

    /// Per-call timeout in seconds
    #[serde(default = "default_upstream_timeout")]
    pub timeout_secs: u64,
}

/// Reference location settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReferenceConfig {
    /// When non-empty, the reference location is written to this path
    /// as a JSON snapshot on every request
    #[serde(default)]
    pub snapshot_path: String,
}

/// API keys for external services
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiKeysConfig {
    /// Google geolocation/geocoding API key
    #[serde(default)]
    pub google: String,
}

// Default value functions for serde
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_geolocation_url() -> String {
    crate::constants::api::GEOLOCATION_URL.to_string()
}
fn default_geocode_url() -> String {
    crate::constants::api::GEOCODE_URL.to_string()
}
fn default_upstream_timeout() -> u64 {
    DEFAULT_UPSTREAM_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            upstream: UpstreamConfig::default(),
            reference: ReferenceConfig::default(),
            api_keys: ApiKeysConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            geolocation_url: default_geolocation_url(),
            geocode_url: default_geocode_url(),
            timeout_secs: default_upstream_timeout(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist. The `GOOGLE_API_KEY`
    /// environment variable, when set, overrides `api_keys.google`.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        let mut config = if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))?
        } else {
            let config = Config::default();
            config.save()?;
            config
        };

        if let Ok(key) = env::var(GOOGLE_API_KEY_ENV) {
            if !key.is_empty() {
                config.api_keys.google = key;
            }
        }

        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["upstream", "geolocation_url"] => Some(self.upstream.geolocation_url.clone()),
            ["upstream", "geocode_url"] => Some(self.upstream.geocode_url.clone()),
            ["upstream", "timeout_secs"] => Some(self.upstream.timeout_secs.to_string()),

            ["reference", "snapshot_path"] => Some(self.reference.snapshot_path.clone()),

            ["api_keys", "google"] => Some(self.api_keys.google.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid port value: {}", value)))?;
            }

            ["upstream", "geolocation_url"] => {
                self.upstream.geolocation_url = value.to_string();
            }
            ["upstream", "geocode_url"] => {
                self.upstream.geocode_url = value.to_string();
            }
            ["upstream", "timeout_secs"] => {
                self.upstream.timeout_secs = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid timeout value: {}", value)))?;
            }

            ["reference", "snapshot_path"] => {
                self.reference.snapshot_path = value.to_string();
            }

            ["api_keys", "google"] => {
                self.api_keys.google = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "server.host",
            "server.port",
            "upstream.geolocation_url",
            "upstream.geocode_url",
            "upstream.timeout_secs",
            "reference.snapshot_path",
            "api_keys.google",
        ]
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
