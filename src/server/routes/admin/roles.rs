//! Role administration endpoints
//!
//! Every role response carries the compiled `routes` alongside the raw
//! selection, so the admin UI can show effective access, not just grants.

use crate::auth::rbac::PermissionSelection;
use crate::core::models::role::RoleStatus;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::AppError;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

/// Role creation payload
#[derive(Debug, Deserialize)]
pub struct CreateRoleRequest {
    pub name: String,
    #[serde(default)]
    pub permissions: PermissionSelection,
}

/// Role update payload (full replace)
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub _id: Uuid,
    pub name: String,
    #[serde(default)]
    pub permissions: PermissionSelection,
    #[serde(default)]
    pub status: Option<RoleStatus>,
}

/// GET /api/admin/role/all/role
pub async fn get_all_roles(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let roles = state.roles.list_active().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        roles,
        "All roles fetched successfully",
    )))
}

/// GET /api/admin/role/view/role/{_id}
pub async fn get_role_by_id(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let role = state
        .roles
        .get_role(path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("Role not found"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        role,
        "Role fetched successfully",
    )))
}

/// GET /api/admin/role/get-all-inactive/role
pub async fn get_inactive_roles(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let roles = state.roles.list_inactive().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        roles,
        "Inactive roles fetched",
    )))
}

/// GET /api/admin/role/get-all-deleted/role
pub async fn get_deleted_roles(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let roles = state.roles.list_deleted().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        roles,
        "Deleted roles fetched",
    )))
}

/// POST /api/admin/role/create/role
pub async fn create_role(
    state: web::Data<AppState>,
    payload: web::Json<CreateRoleRequest>,
) -> Result<HttpResponse, AppError> {
    let payload = payload.into_inner();
    let created = state
        .roles
        .create_role(&payload.name, payload.permissions)
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
        created,
        "Role created successfully",
    )))
}

/// PATCH /api/admin/role/update/role
pub async fn update_role(
    state: web::Data<AppState>,
    payload: web::Json<UpdateRoleRequest>,
) -> Result<HttpResponse, AppError> {
    let payload = payload.into_inner();
    let updated = state
        .roles
        .update_role(payload._id, &payload.name, payload.permissions, payload.status)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        updated,
        "Role updated successfully",
    )))
}

/// DELETE /api/admin/role/delete/role/{_id}
pub async fn delete_role(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    state.roles.soft_delete_role(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        serde_json::Value::Null,
        "Role deleted successfully",
    )))
}

/// Configure role administration routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/role/all/role", web::get().to(get_all_roles))
        .route("/role/view/role/{_id}", web::get().to(get_role_by_id))
        .route(
            "/role/get-all-inactive/role",
            web::get().to(get_inactive_roles),
        )
        .route(
            "/role/get-all-deleted/role",
            web::get().to(get_deleted_roles),
        )
        .route("/role/create/role", web::post().to(create_role))
        .route("/role/update/role", web::patch().to(update_role))
        .route("/role/delete/role/{_id}", web::delete().to(delete_role));
}
