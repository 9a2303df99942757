//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{AppError, Result};
use tracing::info;

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| AppError::config("Configuration is required"))?;

        HttpServer::new(&config).await
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the server with automatic configuration loading
///
/// A missing configuration file falls back to defaults; a malformed
/// permission catalog never does, it aborts startup.
pub async fn run_server() -> Result<()> {
    info!("Starting commune backend");

    let config_path = "config/commune.yaml";
    info!("Loading configuration file: {}", config_path);

    let config = match Config::from_file(config_path).await {
        Ok(config) => {
            info!("Configuration file loaded successfully");
            config
        }
        Err(e) => {
            info!("Configuration file loading failed, using defaults: {}", e);
            Config::default()
        }
    };

    let server = HttpServer::new(&config).await?;
    info!(
        "Server starting at: http://{}:{}",
        config.server.host, config.server.port
    );
    info!("API Endpoints:");
    info!("   GET    /health - Health check");
    info!("   GET    /api/admin/role/all/role - List roles");
    info!("   POST   /api/admin/role/create/role - Create role");
    info!("   PATCH  /api/admin/role/update/role - Update role");
    info!("   DELETE /api/admin/role/delete/role/:_id - Delete role");
    info!("   GET    /dashboard-user/role/details - Principal permissions");

    server.start().await
}
