//! Application state shared across HTTP handlers

use crate::auth::rbac::PermissionCatalog;
use crate::auth::AuthSystem;
use crate::config::Config;
use crate::core::roles::RoleManager;
use crate::core::users::UserManager;
use crate::storage::StorageLayer;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc for cheap sharing across workers.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Permission catalog, loaded once at startup
    pub catalog: Arc<PermissionCatalog>,
    /// Authentication system
    pub auth: Arc<AuthSystem>,
    /// Storage layer
    pub storage: Arc<StorageLayer>,
    /// Role management
    pub roles: Arc<RoleManager>,
    /// User management
    pub users: Arc<UserManager>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(
        config: Config,
        catalog: Arc<PermissionCatalog>,
        auth: AuthSystem,
        storage: Arc<StorageLayer>,
        roles: RoleManager,
        users: UserManager,
    ) -> Self {
        Self {
            config: Arc::new(config),
            catalog,
            auth: Arc::new(auth),
            storage,
            roles: Arc::new(roles),
            users: Arc::new(users),
        }
    }
}
