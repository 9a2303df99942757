//! Role lifecycle management
//!
//! Owns the write path for roles: every selection change is compiled and
//! persisted together with its compiled route set, so a stored role can
//! never carry a selection/routes pair that disagree.

use crate::auth::rbac::{compile, PermissionCatalog, PermissionSelection};
use crate::core::models::role::{Role, RoleStatus};
use crate::storage::StorageLayer;
use crate::utils::error::{AppError, Result};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Role management facade
pub struct RoleManager {
    catalog: Arc<PermissionCatalog>,
    storage: Arc<StorageLayer>,
}

impl RoleManager {
    /// Create a new role manager
    pub fn new(catalog: Arc<PermissionCatalog>, storage: Arc<StorageLayer>) -> Self {
        Self { catalog, storage }
    }

    /// Create a role from a permission selection.
    ///
    /// Rejects duplicate names (case-sensitive exact match among non-deleted
    /// roles). The selection is compiled and persisted in the same insert.
    pub async fn create_role(
        &self,
        name: &str,
        permissions: PermissionSelection,
    ) -> Result<Role> {
        let name = normalize_role_name(name)?;

        if self.storage.db().find_role_by_name(&name).await?.is_some() {
            return Err(AppError::conflict("Role with this name already exists"));
        }

        let routes = compile(&self.catalog, &permissions);
        let new_role = Role::new(name, permissions, routes);
        self.storage.db().create_role(&new_role).await?;

        info!(role = %new_role.id, name = %new_role.name, "role created");
        Ok(new_role)
    }

    /// Full-replace update of a role.
    ///
    /// The compiled route set is rebuilt entirely from the new selection;
    /// there is no incremental merge with the previous state.
    pub async fn update_role(
        &self,
        role_id: Uuid,
        name: &str,
        permissions: PermissionSelection,
        status: Option<RoleStatus>,
    ) -> Result<Role> {
        let name = normalize_role_name(name)?;

        let mut existing = self
            .storage
            .db()
            .find_role_by_id(role_id)
            .await?
            .ok_or_else(|| AppError::not_found("Role not found"))?;

        if let Some(other) = self.storage.db().find_role_by_name(&name).await? {
            if other.id != role_id {
                return Err(AppError::conflict("Role with this name already exists"));
            }
        }

        existing.name = name;
        existing.routes = compile(&self.catalog, &permissions);
        existing.permissions = permissions;
        if let Some(status) = status {
            existing.status = status;
        }
        existing.updated_at = chrono::Utc::now();

        self.storage.db().update_role(&existing).await?;

        debug!(role = %existing.id, routes = existing.routes.len(), "role updated");
        Ok(existing)
    }

    /// Soft-delete a role. Access revocation is not pushed to live sessions;
    /// it applies on the next authorization check.
    pub async fn soft_delete_role(&self, role_id: Uuid) -> Result<()> {
        if !self.storage.db().soft_delete_role(role_id).await? {
            return Err(AppError::not_found("Role not found"));
        }
        info!(role = %role_id, "role soft-deleted");
        Ok(())
    }

    /// Fetch one non-deleted role.
    pub async fn get_role(&self, role_id: Uuid) -> Result<Option<Role>> {
        self.storage.db().find_role_by_id(role_id).await
    }

    /// List non-deleted active roles.
    pub async fn list_active(&self) -> Result<Vec<Role>> {
        self.storage.db().list_active_roles().await
    }

    /// List non-deleted inactive roles.
    pub async fn list_inactive(&self) -> Result<Vec<Role>> {
        self.storage.db().list_inactive_roles().await
    }

    /// List soft-deleted roles.
    pub async fn list_deleted(&self) -> Result<Vec<Role>> {
        self.storage.db().list_deleted_roles().await
    }

    /// Get the permission catalog
    pub fn catalog(&self) -> &PermissionCatalog {
        &self.catalog
    }
}

/// Trim and collapse inner whitespace, then enforce the 3..=100 length rule.
fn normalize_role_name(name: &str) -> Result<String> {
    let name = name.split_whitespace().collect::<Vec<_>>().join(" ");
    if name.len() < 3 || name.len() > 100 {
        return Err(AppError::validation(
            "Role name must be between 3 and 100 characters",
        ));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::rbac::{authorize, Decision, ModuleGrant, BASELINE_ROUTES};
    use crate::config::{DatabaseConfig, StorageConfig};
    use std::collections::BTreeMap;

    async fn test_storage() -> Arc<StorageLayer> {
        let config = StorageConfig {
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                // A single connection keeps the in-memory database alive and
                // shared across the test.
                max_connections: 1,
                connection_timeout: 5,
            },
        };
        let storage = StorageLayer::new(&config).await.unwrap();
        storage.migrate().await.unwrap();
        Arc::new(storage)
    }

    fn test_catalog() -> Arc<PermissionCatalog> {
        Arc::new(
            PermissionCatalog::from_yaml(
                r#"
role:
  create:
    route: /api/admin/role/create/role
  list:
    route: /api/admin/role/all/role
"#,
            )
            .unwrap(),
        )
    }

    fn grants(entries: &[(&str, bool)]) -> PermissionSelection {
        let actions: BTreeMap<String, bool> = entries
            .iter()
            .map(|(key, allowed)| (key.to_string(), *allowed))
            .collect();
        vec![ModuleGrant::single("role", "Roles", actions)]
    }

    #[tokio::test]
    async fn test_create_role_persists_compiled_routes() {
        let manager = RoleManager::new(test_catalog(), test_storage().await);

        let created = manager
            .create_role("Moderators", grants(&[("create", true), ("list", false)]))
            .await
            .unwrap();

        let fetched = manager.get_role(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Moderators");
        assert!(fetched.routes.contains(&"/api/admin/role/create/role".to_string()));
        assert!(!fetched.routes.contains(&"/api/admin/role/all/role".to_string()));
        assert_eq!(fetched.routes.len(), 1 + BASELINE_ROUTES.len());
        assert_eq!(fetched.permissions, created.permissions);
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let manager = RoleManager::new(test_catalog(), test_storage().await);

        manager.create_role("Support", Vec::new()).await.unwrap();
        let result = manager.create_role("Support", Vec::new()).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        // Uniqueness is a case-sensitive exact match.
        assert!(manager.create_role("support", Vec::new()).await.is_ok());
    }

    #[tokio::test]
    async fn test_role_name_whitespace_normalized() {
        let manager = RoleManager::new(test_catalog(), test_storage().await);

        let created = manager
            .create_role("  Sub   Admin ", Vec::new())
            .await
            .unwrap();
        assert_eq!(created.name, "Sub Admin");

        assert!(matches!(
            manager.create_role(" a ", Vec::new()).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_update_recompiles_and_revokes_immediately() {
        let manager = RoleManager::new(test_catalog(), test_storage().await);

        let created = manager
            .create_role("Editors", grants(&[("list", true)]))
            .await
            .unwrap();
        assert_eq!(
            authorize(Some(&created.routes), "/api/admin/role/all/role"),
            Decision::Allow
        );

        manager
            .update_role(created.id, "Editors", grants(&[("list", false)]), None)
            .await
            .unwrap();

        // The next read sees the recompiled set; no warm cache is involved.
        let current = manager.get_role(created.id).await.unwrap().unwrap();
        assert_eq!(
            authorize(Some(&current.routes), "/api/admin/role/all/role"),
            Decision::Deny
        );
    }

    #[tokio::test]
    async fn test_update_to_taken_name_rejected() {
        let manager = RoleManager::new(test_catalog(), test_storage().await);

        manager.create_role("First", Vec::new()).await.unwrap();
        let second = manager.create_role("Second", Vec::new()).await.unwrap();

        let result = manager
            .update_role(second.id, "First", Vec::new(), None)
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        // Keeping its own name is fine.
        assert!(manager
            .update_role(second.id, "Second", Vec::new(), None)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_soft_delete_and_filtered_reads() {
        let manager = RoleManager::new(test_catalog(), test_storage().await);

        let keep = manager.create_role("Keep", Vec::new()).await.unwrap();
        let removed = manager.create_role("Drop", Vec::new()).await.unwrap();

        manager.soft_delete_role(removed.id).await.unwrap();

        let active: Vec<Uuid> = manager
            .list_active()
            .await
            .unwrap()
            .into_iter()
            .map(|role| role.id)
            .collect();
        assert!(active.contains(&keep.id));
        assert!(!active.contains(&removed.id));

        let deleted: Vec<Uuid> = manager
            .list_deleted()
            .await
            .unwrap()
            .into_iter()
            .map(|role| role.id)
            .collect();
        assert!(deleted.contains(&removed.id));

        assert!(manager.get_role(removed.id).await.unwrap().is_none());
        assert!(matches!(
            manager.soft_delete_role(removed.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_inactive_roles_listed_separately() {
        let manager = RoleManager::new(test_catalog(), test_storage().await);

        let parked = manager.create_role("Parked", Vec::new()).await.unwrap();
        manager
            .update_role(parked.id, "Parked", Vec::new(), Some(RoleStatus::Inactive))
            .await
            .unwrap();

        let inactive: Vec<Uuid> = manager
            .list_inactive()
            .await
            .unwrap()
            .into_iter()
            .map(|role| role.id)
            .collect();
        assert!(inactive.contains(&parked.id));

        let active: Vec<Uuid> = manager
            .list_active()
            .await
            .unwrap()
            .into_iter()
            .map(|role| role.id)
            .collect();
        assert!(!active.contains(&parked.id));
    }
}
