use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::models::user::{User, UserStatus};

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// User ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// First name
    pub first_name: Option<String>,

    /// Last name
    pub last_name: Option<String>,

    /// Email address (unique)
    #[sea_orm(unique)]
    pub email: String,

    /// Phone number (unique)
    #[sea_orm(unique)]
    pub phone: String,

    /// Reference to the user's role
    pub role_id: Uuid,

    /// Activity status
    pub status: String,

    /// Profile picture path
    pub profile_pic: Option<String>,

    /// Soft-deletion timestamp
    pub deleted_at: Option<DateTimeWithTimeZone>,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

/// User entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The role this user carries
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::RoleId",
        to = "super::role::Column::Id"
    )]
    Role,
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// Conversion methods between SeaORM model and the domain model
impl Model {
    /// Convert SeaORM model to the domain user model
    pub fn to_domain_user(&self) -> User {
        User {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            role_id: self.role_id,
            status: UserStatus::from_str(&self.status).unwrap_or(UserStatus::Inactive),
            profile_pic: self.profile_pic.clone(),
            deleted_at: self.deleted_at.map(|dt| dt.naive_utc().and_utc()),
            created_at: self.created_at.naive_utc().and_utc(),
            updated_at: self.updated_at.naive_utc().and_utc(),
        }
    }

    /// Convert the domain user model to a SeaORM active model
    pub fn from_domain_user(user: &User) -> ActiveModel {
        ActiveModel {
            id: Set(user.id),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            email: Set(user.email.clone()),
            phone: Set(user.phone.clone()),
            role_id: Set(user.role_id),
            status: Set(user.status.as_str().to_string()),
            profile_pic: Set(user.profile_pic.clone()),
            deleted_at: Set(user.deleted_at.map(|dt| dt.into())),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
        }
    }
}
