//! Role domain model

use crate::auth::rbac::PermissionSelection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Activity status of a role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleStatus {
    Active,
    Inactive,
}

/// A dashboard role: the admin-authored selection plus its compiled routes
///
/// `routes` is derived data. It is recomputed from `permissions` on every
/// change and persisted in the same row write, so the pair never disagrees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    /// Role ID
    pub id: Uuid,
    /// Role name (unique among non-deleted roles, case-sensitive)
    pub name: String,
    /// Admin-authored permission selection
    pub permissions: PermissionSelection,
    /// Compiled route set; always includes the baseline routes
    pub routes: Vec<String>,
    /// Activity status
    pub status: RoleStatus,
    /// Soft-deletion timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// Create a new active role from an already-compiled selection.
    pub fn new(name: String, permissions: PermissionSelection, routes: Vec<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            permissions,
            routes,
            status: RoleStatus::Active,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this role has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

impl RoleStatus {
    /// Storage representation
    pub fn as_str(self) -> &'static str {
        match self {
            RoleStatus::Active => "active",
            RoleStatus::Inactive => "inactive",
        }
    }
}

impl std::str::FromStr for RoleStatus {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(RoleStatus::Active),
            "inactive" => Ok(RoleStatus::Inactive),
            _ => Err(()),
        }
    }
}
