//! Configuration loading for the upload client.

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Configuration for connecting to the analysis service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClientConfig {
    /// Base URL of the service (without the /api/upload suffix).
    #[serde(default = "default_server_url")]
    pub server_url: String,
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn load(config_path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;

        toml::from_str(&content).with_context(|| format!("Failed to parse config file {}", config_path.display()))
    }

    /// Load `config.toml` from the working directory, falling back to the
    /// defaults when the file is absent or unreadable.
    pub fn load_or_default() -> Self {
        let path = Path::new("config.toml");
        if !path.exists() {
            log::info!("No config.toml found, using default server URL {}", DEFAULT_SERVER_URL);
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config.toml, server URL: {}", config.server_url);
                config
            }
            Err(e) => {
                log::warn!("Ignoring config.toml: {:#}", e);
                Self::default()
            }
        }
    }
}
