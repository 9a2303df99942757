//! User administration endpoints
//!
//! Thin data-access glue over `UserManager`. Route paths and verbs mirror
//! the permission catalog's `user` module patterns.

use crate::core::users::UserDetails;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::AppError;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

/// User creation/update payload; `role` carries the role id
#[derive(Debug, Deserialize)]
pub struct UserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub phone: String,
    pub role: Uuid,
    pub profile_pic: Option<String>,
}

impl UserRequest {
    fn into_details(self) -> UserDetails {
        UserDetails {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            role_id: self.role,
            profile_pic: self.profile_pic,
        }
    }
}

/// GET /api/admin/users/list
pub async fn user_list(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let users = state.users.list_users_by_role_names(&["User"]).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        users,
        "User list fetched successfully",
    )))
}

/// GET /api/admin/business/users/list
pub async fn business_user_list(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let users = state.users.list_users_by_role_names(&["Business"]).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        users,
        "Business user list fetched successfully",
    )))
}

/// GET /api/admin/users/admin/list
pub async fn admin_user_list(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let users = state
        .users
        .list_users_by_role_names(&["Admin", "Super Admin"])
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        users,
        "Admin user list fetched successfully",
    )))
}

/// GET /api/admin/user/details/{id}
pub async fn user_detail(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let found = state
        .users
        .get_user(path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        found,
        "User fetched successfully",
    )))
}

/// POST /api/admin/user/create
pub async fn user_create(
    state: web::Data<AppState>,
    payload: web::Json<UserRequest>,
) -> Result<HttpResponse, AppError> {
    let created = state
        .users
        .create_user(payload.into_inner().into_details())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
        created,
        "User created successfully",
    )))
}

/// PUT /api/admin/user/update/{id}
pub async fn user_update(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<UserRequest>,
) -> Result<HttpResponse, AppError> {
    let updated = state
        .users
        .update_user(path.into_inner(), payload.into_inner().into_details())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        updated,
        "User updated successfully",
    )))
}

/// GET /api/admin/user/delete/{id}
pub async fn user_delete(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    state.users.soft_delete_user(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        serde_json::Value::Null,
        "User deleted successfully",
    )))
}

/// PUT /api/admin/user/restore/{id}
pub async fn user_restore(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let restored = state.users.restore_user(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        restored,
        "User restored successfully",
    )))
}

/// GET /api/admin/user/change/status/{id}
pub async fn user_change_status(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let updated = state.users.toggle_user_status(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        updated,
        "User status updated successfully",
    )))
}

/// Configure user administration routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/users/list", web::get().to(user_list))
        .route("/business/users/list", web::get().to(business_user_list))
        .route("/users/admin/list", web::get().to(admin_user_list))
        .route("/user/create", web::post().to(user_create))
        .route("/user/update/{id}", web::put().to(user_update))
        .route("/user/details/{id}", web::get().to(user_detail))
        .route("/user/delete/{id}", web::get().to(user_delete))
        .route("/user/restore/{id}", web::put().to(user_restore))
        .route("/user/change/status/{id}", web::get().to(user_change_status));
}
