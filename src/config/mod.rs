//! Configuration Management Module
//!
//! This module handles loading and managing configuration for the signature
//! store service. Configuration currently covers the API server settings.

use serde::{Deserialize, Serialize};

/// Default config file location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/signature_store.toml";

/// Environment variable that overrides the default config path.
pub const CONFIG_PATH_ENV: &str = "SIGNATURE_STORE_CONFIG_PATH";

// ============================================================================
// CONFIGURATION STRUCTURES
// ============================================================================

/// Main configuration structure containing all service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration (host, port, CORS settings)
    pub api: ApiConfig,
}

/// API server configuration for external communication.
///
/// Controls how the service exposes its REST API endpoints and handles
/// cross-origin requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host address to bind the API server to
    pub host: String,
    /// Port number to bind the API server to
    pub port: u16,
    /// Allowed CORS origins for cross-origin requests ("*" allows any)
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

// ============================================================================
// CONFIGURATION IMPLEMENTATION
// ============================================================================

impl Config {
    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - Configuration is usable
    /// - `Err(anyhow::Error)` - Empty host, port 0, or no CORS origins
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api.host.trim().is_empty() {
            anyhow::bail!("api.host must not be empty");
        }
        if self.api.port == 0 {
            anyhow::bail!("api.port must be non-zero");
        }
        if self.api.cors_origins.is_empty() {
            anyhow::bail!("api.cors_origins must list at least one origin (use \"*\" for any)");
        }
        Ok(())
    }

    /// Loads configuration from a TOML file.
    ///
    /// The path is taken from `path` if given, otherwise from the
    /// `SIGNATURE_STORE_CONFIG_PATH` environment variable, otherwise
    /// `config/signature_store.toml`.
    ///
    /// # Returns
    ///
    /// - `Ok(Config)` - Successfully loaded and validated configuration
    /// - `Err(anyhow::Error)` - File doesn't exist, failed to parse, or validation failed
    pub fn load_from_path(path: Option<&str>) -> anyhow::Result<Self> {
        let config_path = path
            .map(|p| p.to_string())
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

        if std::path::Path::new(&config_path).exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Err(anyhow::anyhow!(
                "Configuration file '{}' not found. Please copy the template:\n\
                cp config/signature_store.template.toml config/signature_store.toml\n\
                Then edit config/signature_store.toml as needed.",
                config_path
            ))
        }
    }

    /// Loads configuration from the env var or default location.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from_path(None)
    }
}

impl Default for Config {
    /// Local development settings: `127.0.0.1:3000`, any CORS origin.
    fn default() -> Self {
        Self {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                cors_origins: default_cors_origins(),
            },
        }
    }
}
