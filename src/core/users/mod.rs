//! Administrative user management
//!
//! Thin data-access glue over the user store: list views filtered by role
//! name, creation with uniqueness checks, updates, soft delete/restore and
//! status toggling. Credential material is never handled here.

use crate::core::models::user::User;
use crate::storage::StorageLayer;
use crate::utils::error::{AppError, Result};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Fields accepted when creating or updating a user
#[derive(Debug, Clone)]
pub struct UserDetails {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub phone: String,
    pub role_id: Uuid,
    pub profile_pic: Option<String>,
}

/// User management facade
pub struct UserManager {
    storage: Arc<StorageLayer>,
}

impl UserManager {
    /// Create a new user manager
    pub fn new(storage: Arc<StorageLayer>) -> Self {
        Self { storage }
    }

    /// List non-deleted users carrying any of the named roles.
    ///
    /// A role name with no matching role contributes no users.
    pub async fn list_users_by_role_names(&self, role_names: &[&str]) -> Result<Vec<User>> {
        let mut role_ids = Vec::new();
        for name in role_names {
            if let Some(found) = self.storage.db().find_role_by_name(name).await? {
                role_ids.push(found.id);
            }
        }
        if role_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.storage.db().list_users_by_role_ids(&role_ids).await
    }

    /// Fetch one non-deleted user.
    pub async fn get_user(&self, user_id: Uuid) -> Result<Option<User>> {
        self.storage.db().find_user_by_id(user_id).await
    }

    /// Create a user; phone and email must be unused.
    pub async fn create_user(&self, details: UserDetails) -> Result<User> {
        validate_contact(&details)?;

        if self
            .storage
            .db()
            .find_user_by_phone(&details.phone)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("User with this phone already exists"));
        }
        if self
            .storage
            .db()
            .find_user_by_email(&details.email)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("User with this email already exists"));
        }
        if self
            .storage
            .db()
            .find_role_by_id(details.role_id)
            .await?
            .is_none()
        {
            return Err(AppError::validation("Role does not exist"));
        }

        let mut new_user = User::new(
            details.first_name,
            details.last_name,
            details.email,
            details.phone,
            details.role_id,
        );
        new_user.profile_pic = details.profile_pic;

        self.storage.db().create_user(&new_user).await?;
        info!(user = %new_user.id, "user created");
        Ok(new_user)
    }

    /// Update a user; changed phone/email must not collide with other users.
    pub async fn update_user(&self, user_id: Uuid, details: UserDetails) -> Result<User> {
        validate_contact(&details)?;

        let mut existing = self
            .storage
            .db()
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if details.phone != existing.phone {
            if let Some(other) = self.storage.db().find_user_by_phone(&details.phone).await? {
                if other.id != user_id {
                    return Err(AppError::conflict("Phone number already exists"));
                }
            }
        }
        if details.email != existing.email {
            if let Some(other) = self.storage.db().find_user_by_email(&details.email).await? {
                if other.id != user_id {
                    return Err(AppError::conflict("Email already exists"));
                }
            }
        }

        existing.first_name = details.first_name.or(existing.first_name);
        existing.last_name = details.last_name.or(existing.last_name);
        existing.email = details.email;
        existing.phone = details.phone;
        existing.role_id = details.role_id;
        existing.profile_pic = details.profile_pic.or(existing.profile_pic);
        existing.updated_at = chrono::Utc::now();

        self.storage.db().update_user(&existing).await?;
        debug!(user = %existing.id, "user updated");
        Ok(existing)
    }

    /// Soft-delete a user.
    pub async fn soft_delete_user(&self, user_id: Uuid) -> Result<()> {
        if !self.storage.db().soft_delete_user(user_id).await? {
            return Err(AppError::not_found("User not found"));
        }
        info!(user = %user_id, "user soft-deleted");
        Ok(())
    }

    /// Restore a soft-deleted user.
    pub async fn restore_user(&self, user_id: Uuid) -> Result<User> {
        self.storage
            .db()
            .restore_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Toggle a user's activity status.
    pub async fn toggle_user_status(&self, user_id: Uuid) -> Result<User> {
        let existing = self
            .storage
            .db()
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        self.storage
            .db()
            .set_user_status(user_id, existing.status.toggled())
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}

fn validate_contact(details: &UserDetails) -> Result<()> {
    if details.phone.trim().is_empty() {
        return Err(AppError::validation("Phone is required"));
    }
    if details.email.trim().is_empty() || !details.email.contains('@') {
        return Err(AppError::validation("A valid email is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::rbac::PermissionCatalog;
    use crate::config::{DatabaseConfig, StorageConfig};
    use crate::core::models::user::UserStatus;
    use crate::core::roles::RoleManager;

    async fn test_setup() -> (UserManager, RoleManager, Uuid) {
        let config = StorageConfig {
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
                connection_timeout: 5,
            },
        };
        let storage = Arc::new(StorageLayer::new(&config).await.unwrap());
        storage.migrate().await.unwrap();

        let roles = RoleManager::new(Arc::new(PermissionCatalog::default()), storage.clone());
        let seeded = roles.create_role("User", Vec::new()).await.unwrap();

        (UserManager::new(storage), roles, seeded.id)
    }

    fn details(email: &str, phone: &str, role_id: Uuid) -> UserDetails {
        UserDetails {
            first_name: Some("Test".to_string()),
            last_name: None,
            email: email.to_string(),
            phone: phone.to_string(),
            role_id,
            profile_pic: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_fetch_user() {
        let (users, _roles, role_id) = test_setup().await;

        let created = users
            .create_user(details("a@example.com", "5550001", role_id))
            .await
            .unwrap();

        let fetched = users.get_user(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.email, "a@example.com");
        assert_eq!(fetched.role_id, role_id);
        assert!(fetched.is_active());
    }

    #[tokio::test]
    async fn test_duplicate_phone_and_email_rejected() {
        let (users, _roles, role_id) = test_setup().await;

        users
            .create_user(details("a@example.com", "5550001", role_id))
            .await
            .unwrap();

        let dup_phone = users
            .create_user(details("b@example.com", "5550001", role_id))
            .await;
        assert!(matches!(dup_phone, Err(AppError::Conflict(_))));

        let dup_email = users
            .create_user(details("a@example.com", "5550002", role_id))
            .await;
        assert!(matches!(dup_email, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_unknown_role_rejected() {
        let (users, _roles, _role_id) = test_setup().await;

        let result = users
            .create_user(details("a@example.com", "5550001", Uuid::new_v4()))
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_users_by_role_names() {
        let (users, roles, role_id) = test_setup().await;
        let business = roles.create_role("Business", Vec::new()).await.unwrap();

        users
            .create_user(details("a@example.com", "5550001", role_id))
            .await
            .unwrap();
        users
            .create_user(details("b@example.com", "5550002", business.id))
            .await
            .unwrap();

        let listed = users.list_users_by_role_names(&["Business"]).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].email, "b@example.com");

        // Unknown role names contribute nothing.
        assert!(users
            .list_users_by_role_names(&["Nope"])
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_soft_delete_restore_and_status_toggle() {
        let (users, _roles, role_id) = test_setup().await;

        let created = users
            .create_user(details("a@example.com", "5550001", role_id))
            .await
            .unwrap();

        users.soft_delete_user(created.id).await.unwrap();
        assert!(users.get_user(created.id).await.unwrap().is_none());

        let restored = users.restore_user(created.id).await.unwrap();
        assert!(restored.deleted_at.is_none());

        let toggled = users.toggle_user_status(created.id).await.unwrap();
        assert_eq!(toggled.status, UserStatus::Inactive);
        assert!(!toggled.is_active());

        let toggled_back = users.toggle_user_status(created.id).await.unwrap();
        assert_eq!(toggled_back.status, UserStatus::Active);
    }
}
