//! Configuration management
//!
//! This module handles loading and validation of the service configuration.
//! The permission catalog is a separate resource (see `auth::rbac`); this
//! config only records where to find it.

pub mod models;

pub use models::*;

use crate::utils::error::{AppError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the backend
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Permission catalog location
    #[serde(default)]
    pub permissions: CatalogConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::config(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Build a configuration from defaults plus environment overrides
    ///
    /// Recognized variables: `COMMUNE_HOST`, `COMMUNE_PORT`,
    /// `COMMUNE_DATABASE_URL`, `COMMUNE_JWT_SECRET`, `COMMUNE_CATALOG_PATH`.
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(host) = std::env::var("COMMUNE_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("COMMUNE_PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| AppError::config(format!("Invalid COMMUNE_PORT: {}", port)))?;
        }
        if let Ok(url) = std::env::var("COMMUNE_DATABASE_URL") {
            config.storage.database.url = url;
        }
        if let Ok(secret) = std::env::var("COMMUNE_JWT_SECRET") {
            config.auth.jwt_secret = secret;
        }
        if let Ok(path) = std::env::var("COMMUNE_CATALOG_PATH") {
            config.permissions.path = path;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|e| AppError::config(format!("Server config error: {}", e)))?;
        self.auth
            .validate()
            .map_err(|e| AppError::config(format!("Auth config error: {}", e)))?;
        self.storage
            .database
            .validate()
            .map_err(|e| AppError::config(format!("Database config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_config_from_file() {
        let config_content = r#"
server:
  host: "127.0.0.1"
  port: 9090

auth:
  jwt_secret: "test-secret-that-is-at-least-32-characters-long"
  jwt_expiration: 3600

storage:
  database:
    url: "sqlite::memory:"
    max_connections: 1

permissions:
  path: "config/permissions.yaml"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();

        let config = Config::from_file(temp_file.path()).await.unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.storage.database.url, "sqlite::memory:");
        assert_eq!(config.permissions.path, "config/permissions.yaml");
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_weak_jwt_secret_rejected() {
        let mut config = Config::default();
        config.auth.jwt_secret = "short".to_string();
        assert!(config.validate().is_err());
    }

    #[tokio::test]
    async fn test_malformed_config_file_rejected() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"server: [not, a, mapping]").unwrap();

        assert!(Config::from_file(temp_file.path()).await.is_err());
    }
}
