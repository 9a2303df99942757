use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::auth::rbac::PermissionSelection;
use crate::core::models::role::{Role, RoleStatus};

/// Role database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    /// Role ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Role name (unique among non-deleted roles)
    pub name: String,

    /// Admin-authored permission selection (JSON document)
    pub permissions: Json,

    /// Compiled route set; derived from `permissions` and written in the
    /// same row so the pair never disagrees
    pub routes: Json,

    /// Activity status
    pub status: String,

    /// Soft-deletion timestamp
    pub deleted_at: Option<DateTimeWithTimeZone>,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

/// Role entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Users carrying this role
    #[sea_orm(has_many = "super::user::Entity")]
    Users,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// Conversion methods between SeaORM model and the domain model
impl Model {
    /// Convert SeaORM model to the domain role model
    pub fn to_domain_role(&self) -> crate::utils::error::Result<Role> {
        let permissions: PermissionSelection = serde_json::from_value(self.permissions.clone())?;
        let routes: Vec<String> = serde_json::from_value(self.routes.clone())?;

        Ok(Role {
            id: self.id,
            name: self.name.clone(),
            permissions,
            routes,
            status: RoleStatus::from_str(&self.status).unwrap_or(RoleStatus::Active),
            deleted_at: self.deleted_at.map(|dt| dt.naive_utc().and_utc()),
            created_at: self.created_at.naive_utc().and_utc(),
            updated_at: self.updated_at.naive_utc().and_utc(),
        })
    }

    /// Convert the domain role model to a SeaORM active model
    pub fn from_domain_role(role: &Role) -> crate::utils::error::Result<ActiveModel> {
        Ok(ActiveModel {
            id: Set(role.id),
            name: Set(role.name.clone()),
            permissions: Set(serde_json::to_value(&role.permissions)?),
            routes: Set(serde_json::to_value(&role.routes)?),
            status: Set(role.status.as_str().to_string()),
            deleted_at: Set(role.deleted_at.map(|dt| dt.into())),
            created_at: Set(role.created_at.into()),
            updated_at: Set(role.updated_at.into()),
        })
    }
}
