//! Shared HTTP handlers

use crate::server::state::AppState;
use actix_web::{web, HttpResponse};

/// Liveness and storage health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let storage = state.storage.health_check().await.ok();
    let healthy = storage.as_ref().map(|status| status.overall).unwrap_or(false);

    let body = serde_json::json!({
        "status": if healthy { "ok" } else { "degraded" },
        "version": crate::VERSION,
        "storage": storage,
    });

    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
