use crate::config::DatabaseConfig;
use crate::core::models::role::{Role, RoleStatus};
use crate::core::models::user::{User, UserStatus};
use crate::utils::error::{AppError, Result};
use sea_orm::*;
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::entities::{self, role, user};
use super::migration::Migrator;

/// SeaORM-based database implementation
#[derive(Debug)]
pub struct SeaOrmDatabase {
    db: DatabaseConnection,
}

impl SeaOrmDatabase {
    /// Create a new database connection
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let mut opt = ConnectOptions::new(config.url.clone());
        opt.max_connections(config.max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.connection_timeout))
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .sqlx_logging(true)
            .sqlx_logging_level(log::LevelFilter::Debug);

        let db = Database::connect(opt)
            .await
            .map_err(AppError::Database)?;

        info!("Database connection established");
        Ok(Self { db })
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        info!("Running database migrations...");
        Migrator::up(&self.db, None).await.map_err(|e| {
            warn!("Migration failed: {}", e);
            AppError::Database(e)
        })?;
        info!("Database migrations completed successfully");
        Ok(())
    }

    // Role operations

    /// Find a non-deleted role by ID
    pub async fn find_role_by_id(&self, role_id: uuid::Uuid) -> Result<Option<Role>> {
        debug!("Finding role by ID: {}", role_id);

        let model = entities::Role::find_by_id(role_id)
            .filter(role::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::Database)?;

        model.map(|m| m.to_domain_role()).transpose()
    }

    /// Find a non-deleted role by exact name
    pub async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>> {
        debug!("Finding role by name: {}", name);

        let model = entities::Role::find()
            .filter(role::Column::Name.eq(name))
            .filter(role::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::Database)?;

        model.map(|m| m.to_domain_role()).transpose()
    }

    /// Persist a new role; selection and compiled routes land in one insert
    pub async fn create_role(&self, new_role: &Role) -> Result<Role> {
        debug!("Creating role: {}", new_role.name);

        let active_model = role::Model::from_domain_role(new_role)?;

        entities::Role::insert(active_model)
            .exec(&self.db)
            .await
            .map_err(AppError::Database)?;

        Ok(new_role.clone())
    }

    /// Replace a role row wholesale; one UPDATE carries name, selection and
    /// compiled routes together
    pub async fn update_role(&self, updated: &Role) -> Result<()> {
        debug!("Updating role: {}", updated.id);

        let active_model = role::Model::from_domain_role(updated)?;

        entities::Role::update(active_model)
            .exec(&self.db)
            .await
            .map_err(AppError::Database)?;

        Ok(())
    }

    /// Soft-delete a role; returns false when no non-deleted role matched
    pub async fn soft_delete_role(&self, role_id: uuid::Uuid) -> Result<bool> {
        debug!("Soft-deleting role: {}", role_id);

        let model = entities::Role::find_by_id(role_id)
            .filter(role::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::Database)?;

        let Some(model) = model else {
            return Ok(false);
        };

        let mut active_model: role::ActiveModel = model.into();
        active_model.deleted_at = Set(Some(chrono::Utc::now().into()));
        active_model.updated_at = Set(chrono::Utc::now().into());

        active_model
            .update(&self.db)
            .await
            .map_err(AppError::Database)?;

        Ok(true)
    }

    /// List non-deleted active roles
    pub async fn list_active_roles(&self) -> Result<Vec<Role>> {
        let models = entities::Role::find()
            .filter(role::Column::DeletedAt.is_null())
            .filter(role::Column::Status.eq(RoleStatus::Active.as_str()))
            .order_by_asc(role::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::Database)?;

        models.iter().map(role::Model::to_domain_role).collect()
    }

    /// List non-deleted inactive roles
    pub async fn list_inactive_roles(&self) -> Result<Vec<Role>> {
        let models = entities::Role::find()
            .filter(role::Column::DeletedAt.is_null())
            .filter(role::Column::Status.eq(RoleStatus::Inactive.as_str()))
            .order_by_asc(role::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::Database)?;

        models.iter().map(role::Model::to_domain_role).collect()
    }

    /// List soft-deleted roles
    pub async fn list_deleted_roles(&self) -> Result<Vec<Role>> {
        let models = entities::Role::find()
            .filter(role::Column::DeletedAt.is_not_null())
            .order_by_asc(role::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::Database)?;

        models.iter().map(role::Model::to_domain_role).collect()
    }

    /// Count non-deleted roles
    pub async fn count_roles(&self) -> Result<u64> {
        entities::Role::find()
            .filter(role::Column::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(AppError::Database)
    }

    // User operations

    /// Find a non-deleted user by ID
    pub async fn find_user_by_id(&self, user_id: uuid::Uuid) -> Result<Option<User>> {
        debug!("Finding user by ID: {}", user_id);

        let model = entities::User::find_by_id(user_id)
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::Database)?;

        Ok(model.map(|m| m.to_domain_user()))
    }

    /// Find a non-deleted user by email
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let model = entities::User::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::Database)?;

        Ok(model.map(|m| m.to_domain_user()))
    }

    /// Find a non-deleted user by phone
    pub async fn find_user_by_phone(&self, phone: &str) -> Result<Option<User>> {
        let model = entities::User::find()
            .filter(user::Column::Phone.eq(phone))
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::Database)?;

        Ok(model.map(|m| m.to_domain_user()))
    }

    /// Persist a new user
    pub async fn create_user(&self, new_user: &User) -> Result<User> {
        debug!("Creating user: {}", new_user.email);

        let active_model = user::Model::from_domain_user(new_user);

        entities::User::insert(active_model)
            .exec(&self.db)
            .await
            .map_err(AppError::Database)?;

        Ok(new_user.clone())
    }

    /// Replace a user row wholesale
    pub async fn update_user(&self, updated: &User) -> Result<()> {
        debug!("Updating user: {}", updated.id);

        let active_model = user::Model::from_domain_user(updated);

        entities::User::update(active_model)
            .exec(&self.db)
            .await
            .map_err(AppError::Database)?;

        Ok(())
    }

    /// Soft-delete a user; returns false when no non-deleted user matched
    pub async fn soft_delete_user(&self, user_id: uuid::Uuid) -> Result<bool> {
        debug!("Soft-deleting user: {}", user_id);

        let model = entities::User::find_by_id(user_id)
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::Database)?;

        let Some(model) = model else {
            return Ok(false);
        };

        let mut active_model: user::ActiveModel = model.into();
        active_model.deleted_at = Set(Some(chrono::Utc::now().into()));
        active_model.updated_at = Set(chrono::Utc::now().into());

        active_model
            .update(&self.db)
            .await
            .map_err(AppError::Database)?;

        Ok(true)
    }

    /// Clear a user's soft-deletion mark
    pub async fn restore_user(&self, user_id: uuid::Uuid) -> Result<Option<User>> {
        debug!("Restoring user: {}", user_id);

        let model = entities::User::find_by_id(user_id)
            .filter(user::Column::DeletedAt.is_not_null())
            .one(&self.db)
            .await
            .map_err(AppError::Database)?;

        let Some(model) = model else {
            return Ok(None);
        };

        let mut active_model: user::ActiveModel = model.into();
        active_model.deleted_at = Set(None);
        active_model.updated_at = Set(chrono::Utc::now().into());

        let restored = active_model
            .update(&self.db)
            .await
            .map_err(AppError::Database)?;

        Ok(Some(restored.to_domain_user()))
    }

    /// Set a user's activity status
    pub async fn set_user_status(
        &self,
        user_id: uuid::Uuid,
        status: UserStatus,
    ) -> Result<Option<User>> {
        let model = entities::User::find_by_id(user_id)
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::Database)?;

        let Some(model) = model else {
            return Ok(None);
        };

        let mut active_model: user::ActiveModel = model.into();
        active_model.status = Set(status.as_str().to_string());
        active_model.updated_at = Set(chrono::Utc::now().into());

        let updated = active_model
            .update(&self.db)
            .await
            .map_err(AppError::Database)?;

        Ok(Some(updated.to_domain_user()))
    }

    /// List non-deleted users carrying any of the given roles
    pub async fn list_users_by_role_ids(&self, role_ids: &[uuid::Uuid]) -> Result<Vec<User>> {
        let models = entities::User::find()
            .filter(user::Column::DeletedAt.is_null())
            .filter(user::Column::RoleId.is_in(role_ids.iter().copied()))
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::Database)?;

        Ok(models.iter().map(user::Model::to_domain_user).collect())
    }

    /// Count non-deleted users
    pub async fn count_users(&self) -> Result<u64> {
        entities::User::find()
            .filter(user::Column::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(AppError::Database)
    }

    /// Get the underlying database connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Health check
    pub async fn health_check(&self) -> Result<()> {
        debug!("Performing database health check");
        self.db.ping().await.map_err(AppError::Database)
    }
}
