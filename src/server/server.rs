//! HTTP server core implementation
//!
//! This module provides the HttpServer struct and its core methods.

use crate::auth::rbac::PermissionCatalog;
use crate::auth::AuthSystem;
use crate::config::{Config, ServerConfig};
use crate::core::roles::RoleManager;
use crate::core::users::UserManager;
use crate::server::handlers::health_check;
use crate::server::middleware::{AuthMiddleware, DashboardGate};
use crate::server::routes;
use crate::server::state::AppState;
use crate::storage::StorageLayer;
use crate::utils::error::{AppError, Result};
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer as ActixHttpServer};
use std::sync::Arc;
use tracing::info;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        // The permission catalog is loaded exactly once; malformed content
        // aborts startup rather than being handled per request.
        let catalog = Arc::new(PermissionCatalog::from_file(&config.permissions.path).await?);

        let storage = Arc::new(StorageLayer::new(&config.storage).await?);
        storage.migrate().await?;

        let auth = AuthSystem::new(&config.auth, Arc::clone(&storage));
        let roles = RoleManager::new(Arc::clone(&catalog), Arc::clone(&storage));
        let users = UserManager::new(Arc::clone(&storage));

        let state = AppState::new(config.clone(), catalog, auth, storage, roles, users);

        Ok(Self {
            config: config.server.clone(),
            state,
        })
    }

    /// Create the Actix-web application
    pub(crate) fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        info!("Setting up routes and middleware");

        let cors_config = &state.config.server.cors;
        let mut cors = Cors::default();

        if cors_config.enabled {
            if cors_config.allows_all_origins() {
                cors = cors.allow_any_origin();
            } else {
                for origin in &cors_config.allowed_origins {
                    cors = cors.allowed_origin(origin);
                }
            }
            cors = cors
                .allow_any_method()
                .allow_any_header()
                .max_age(cors_config.max_age as usize);
            if cors_config.allow_credentials {
                cors = cors.supports_credentials();
            }
        }

        App::new()
            .app_data(state)
            .wrap(AuthMiddleware)
            .wrap(Logger::default())
            .wrap(cors)
            .route("/health", web::get().to(health_check))
            .service(
                web::resource("/dashboard-user/role/details")
                    .wrap(DashboardGate)
                    .route(web::get().to(routes::admin::dashboard::role_details)),
            )
            .configure(routes::admin::configure_routes)
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = format!("{}:{}", self.config.host, self.config.port);

        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);
        let workers = self.config.workers;

        let mut server = ActixHttpServer::new(move || Self::create_app(state.clone()));
        if let Some(workers) = workers {
            server = server.workers(workers);
        }

        let server = server
            .bind(&bind_addr)
            .map_err(|e| AppError::config(format!("Failed to bind {}: {}", bind_addr, e)))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
