//! Authentication and authorization
//!
//! Credential issuance (login, OTP, password reset) lives in an external
//! service; this module consumes its tokens, resolves the principal behind a
//! request, and hosts the role permission subsystem (`rbac`).

pub mod jwt;
pub mod rbac;

use crate::config::AuthConfig;
use crate::core::models::user::User;
use crate::storage::StorageLayer;
use crate::utils::error::{AppError, Result};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// The authenticated actor behind a request, carrying its role reference
///
/// Ephemeral: resolved per request, never persisted by this subsystem.
#[derive(Debug, Clone)]
pub struct Principal {
    /// The active user record backing this principal
    pub user: User,
}

impl Principal {
    /// Role reference carried by this principal.
    pub fn role_id(&self) -> Uuid {
        self.user.role_id
    }
}

/// Verifies inbound credentials and resolves request principals
#[derive(Clone)]
pub struct AuthSystem {
    config: Arc<AuthConfig>,
    storage: Arc<StorageLayer>,
    jwt: Arc<jwt::JwtHandler>,
}

impl AuthSystem {
    /// Create a new authentication system
    pub fn new(config: &AuthConfig, storage: Arc<StorageLayer>) -> Self {
        Self {
            config: Arc::new(config.clone()),
            storage,
            jwt: Arc::new(jwt::JwtHandler::new(config)),
        }
    }

    /// Resolve the principal behind a bearer token.
    ///
    /// Verification failures map to `Unauthorized`. Storage unavailability
    /// propagates as `Database` so the request boundary never reads an
    /// upstream failure as a policy denial.
    pub async fn resolve(&self, token: &str) -> Result<Principal> {
        let claims = self.jwt.verify_token(token)?;

        let user = self
            .storage
            .db()
            .find_user_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::unauthorized("User not found"))?;

        if !user.is_active() {
            return Err(AppError::unauthorized("User is not active"));
        }

        debug!(user = %user.id, "principal resolved");
        Ok(Principal { user })
    }

    /// Get the JWT handler
    pub fn jwt(&self) -> &jwt::JwtHandler {
        &self.jwt
    }

    /// Get the authentication configuration
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}
