//! Dashboard landing, profile and principal introspection endpoints
//!
//! These back the baseline routes every authenticated principal can reach.

use crate::core::models::role::Role;
use crate::server::middleware::request_principal;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::AppError;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;
use uuid::Uuid;

/// Dashboard landing summary
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub roles: u64,
    pub users: u64,
}

/// Role reference for client bootstrap
#[derive(Debug, Serialize)]
pub struct RoleSummary {
    pub id: Uuid,
    pub name: String,
}

/// The current principal's role, exposed as its raw permission selection.
/// The compiled route set stays internal to the authorization decision.
#[derive(Debug, Serialize)]
pub struct RoleDetails {
    pub id: Uuid,
    pub name: String,
    pub permissions: crate::auth::rbac::PermissionSelection,
}

impl RoleDetails {
    fn from_role(role: Role) -> Self {
        Self {
            id: role.id,
            name: role.name,
            permissions: role.permissions,
        }
    }
}

/// GET /api/admin/dashboard
pub async fn dashboard(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let summary = DashboardSummary {
        roles: state.storage.db().count_roles().await?,
        users: state.storage.db().count_users().await?,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        summary,
        "Dashboard fetched successfully",
    )))
}

/// GET /api/admin/profile
pub async fn profile(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let principal = request_principal(&req)?;
    let role = state.storage.db().find_role_by_id(principal.role_id()).await?;

    #[derive(Debug, Serialize)]
    struct Profile {
        user: crate::core::models::user::User,
        role: Option<RoleSummary>,
    }

    let body = Profile {
        role: role.map(|role| RoleSummary {
            id: role.id,
            name: role.name,
        }),
        user: principal.user,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        body,
        "Profile fetched successfully",
    )))
}

/// GET /api/admin/dashboard-user/role
pub async fn dashboard_user_roles(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let roles: Vec<RoleSummary> = state
        .roles
        .list_active()
        .await?
        .into_iter()
        .map(|role| RoleSummary {
            id: role.id,
            name: role.name,
        })
        .collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        roles,
        "Roles fetched successfully",
    )))
}

/// GET /dashboard-user/role/details
///
/// Principal introspection: returns the role's permission selection for the
/// client UI, distinct from the authorization decision path.
pub async fn role_details(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let principal = request_principal(&req)?;
    let role = state
        .storage
        .db()
        .find_role_by_id(principal.role_id())
        .await?
        .ok_or_else(|| AppError::not_found("Role not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        RoleDetails::from_role(role),
        "Dashboard user details fetched successfully",
    )))
}

/// Configure dashboard routes (inside the `/api/admin` scope)
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/dashboard", web::get().to(dashboard))
        .route("/profile", web::get().to(profile))
        .route("/dashboard-user/role", web::get().to(dashboard_user_roles));
}
