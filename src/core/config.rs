//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated
//! from environment variables (and a `.env` file when present), plus the
//! registries file the catalog is built from.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use crate::domains::registries::RegistryConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Registries served by the catalog.
    pub registries: RegistriesConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Registry configuration, loaded once at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistriesConfig {
    /// File the registries were loaded from, if any.
    pub file: Option<PathBuf>,

    /// Registries in declaration order.
    pub registries: Vec<RegistryConfig>,
}

impl RegistriesConfig {
    /// Load a JSON array of registry configurations.
    ///
    /// Relative base paths are resolved against the file's directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "cannot read registries file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut registries: Vec<RegistryConfig> = serde_json::from_str(&raw)?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        for registry in &mut registries {
            if registry.layout.base_path.is_relative() {
                registry.layout.base_path = base_dir.join(&registry.layout.base_path);
            }
        }

        Ok(Self {
            file: Some(path.to_path_buf()),
            registries,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "design-registry-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            registries: RegistriesConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_REGISTRIES_FILE`.
    ///
    /// A missing or unreadable registries file is not fatal: the catalog
    /// simply starts empty.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        match std::env::var("MCP_REGISTRIES_FILE") {
            Ok(file) => match RegistriesConfig::from_file(&file) {
                Ok(registries) => {
                    info!(
                        "Loaded {} registries from {}",
                        registries.registries.len(),
                        file
                    );
                    config.registries = registries;
                }
                Err(e) => warn!("Ignoring registries file: {}", e),
            },
            Err(_) => warn!("MCP_REGISTRIES_FILE not set - no registries will be served"),
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    const REGISTRIES_JSON: &str = r#"[
        {
            "name": "Demo",
            "installCommand": "npm install demo-ui",
            "description": "Demo design system",
            "useCases": ["forms"],
            "layout": {
                "basePath": "demo",
                "components": { "root": "src", "subDirs": ["atoms"], "extensions": [".md"] }
            }
        },
        {
            "name": "Absolute",
            "layout": {
                "basePath": "/srv/absolute",
                "components": { "root": "src", "subDirs": [], "extensions": [] }
            }
        }
    ]"#;

    #[test]
    fn test_registries_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("registries.json");
        fs::write(&file, REGISTRIES_JSON).unwrap();

        let loaded = RegistriesConfig::from_file(&file).unwrap();
        assert_eq!(loaded.file.as_deref(), Some(file.as_path()));
        assert_eq!(loaded.registries.len(), 2);
        assert_eq!(
            loaded.registries[0].layout.base_path,
            temp_dir.path().join("demo")
        );
        assert_eq!(
            loaded.registries[1].layout.base_path,
            PathBuf::from("/srv/absolute")
        );
    }

    #[test]
    fn test_registries_from_missing_file() {
        let result = RegistriesConfig::from_file("/nonexistent/registries.json");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_registries_from_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("registries.json");
        fs::write(&file, "{ not json").unwrap();

        assert!(matches!(
            RegistriesConfig::from_file(&file),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_registries_file_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("registries.json");
        fs::write(&file, REGISTRIES_JSON).unwrap();

        unsafe {
            std::env::set_var("MCP_REGISTRIES_FILE", &file);
        }
        let config = Config::from_env();
        assert_eq!(config.registries.registries.len(), 2);
        unsafe {
            std::env::remove_var("MCP_REGISTRIES_FILE");
        }
    }

    #[test]
    fn test_broken_registries_file_is_not_fatal() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_REGISTRIES_FILE", "/nonexistent/registries.json");
        }
        let config = Config::from_env();
        assert!(config.registries.registries.is_empty());
        unsafe {
            std::env::remove_var("MCP_REGISTRIES_FILE");
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server.name, "design-registry-mcp");
        assert_eq!(config.logging.level, "info");
        assert!(config.registries.registries.is_empty());
    }
}
