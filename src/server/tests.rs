//! Tests for the HTTP boundary
//!
//! Exercises the full middleware chain: token resolution, per-request role
//! re-read and the route gate, against an in-memory database.

#[cfg(test)]
mod tests {
    use crate::auth::rbac::{ModuleGrant, PermissionCatalog, PermissionSelection};
    use crate::auth::AuthSystem;
    use crate::config::{Config, DatabaseConfig, StorageConfig};
    use crate::core::models::user::User;
    use crate::core::roles::RoleManager;
    use crate::core::users::UserManager;
    use crate::server::handlers::health_check;
    use crate::server::middleware::{AuthMiddleware, DashboardGate};
    use crate::server::routes;
    use crate::server::state::AppState;
    use crate::storage::StorageLayer;
    use actix_web::dev::{Service, ServiceResponse};
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, web, App};
    use std::collections::BTreeMap;
    use std::sync::Arc;

    const CATALOG: &str = r#"
role:
  create:
    route: /api/admin/role/create/role
  list:
    route: /api/admin/role/all/role
"#;

    fn grants(entries: &[(&str, bool)]) -> PermissionSelection {
        let actions: BTreeMap<String, bool> = entries
            .iter()
            .map(|(key, allowed)| (key.to_string(), *allowed))
            .collect();
        vec![ModuleGrant::single("role", "Roles", actions)]
    }

    /// Build a complete state over an in-memory database, with one role
    /// carrying the given grants and one user carrying that role. Returns
    /// the state and a bearer token for the user.
    async fn test_state(entries: &[(&str, bool)]) -> (AppState, String) {
        let config = Config::default();
        let storage_config = StorageConfig {
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
                connection_timeout: 5,
            },
        };

        let storage = Arc::new(StorageLayer::new(&storage_config).await.unwrap());
        storage.migrate().await.unwrap();

        let catalog = Arc::new(PermissionCatalog::from_yaml(CATALOG).unwrap());
        let auth = AuthSystem::new(&config.auth, Arc::clone(&storage));
        let roles = RoleManager::new(Arc::clone(&catalog), Arc::clone(&storage));
        let users = UserManager::new(Arc::clone(&storage));

        let seeded_role = roles.create_role("Gatekeeper", grants(entries)).await.unwrap();
        let seeded_user = User::new(
            Some("Ada".to_string()),
            None,
            "ada@example.com".to_string(),
            "5550000".to_string(),
            seeded_role.id,
        );
        storage.db().create_user(&seeded_user).await.unwrap();

        let token = auth.jwt().create_access_token(seeded_user.id).unwrap();
        let state = AppState::new(config, catalog, auth, storage, roles, users);
        (state, token)
    }

    macro_rules! test_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state.clone()))
                    .wrap(AuthMiddleware)
                    .route("/health", web::get().to(health_check))
                    .service(
                        web::resource("/dashboard-user/role/details")
                            .wrap(DashboardGate)
                            .route(web::get().to(routes::admin::dashboard::role_details)),
                    )
                    .configure(routes::admin::configure_routes),
            )
            .await
        };
    }

    /// Drive a request and collapse middleware errors into their status.
    async fn request_status<S, B, R>(app: &S, req: R) -> StatusCode
    where
        S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    {
        match test::try_call_service(app, req).await {
            Ok(response) => response.status(),
            Err(err) => err.as_response_error().status_code(),
        }
    }

    fn get(uri: &str, token: &str) -> actix_web::test::TestRequest {
        test::TestRequest::get()
            .uri(uri)
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
    }

    #[actix_web::test]
    async fn test_health_is_public() {
        let (state, _token) = test_state(&[]).await;
        let app = test_app!(state);

        let status = request_status(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_missing_token_is_unauthorized() {
        let (state, _token) = test_state(&[("list", true)]).await;
        let app = test_app!(state);

        let status = request_status(
            &app,
            test::TestRequest::get().uri("/api/admin/role/all/role").to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_granted_route_allowed_ungranted_denied() {
        let (state, token) = test_state(&[("create", true), ("list", false)]).await;
        let app = test_app!(state);

        // list was not granted
        let status = request_status(&app, get("/api/admin/role/all/role", &token).to_request()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        // create was granted; the handler runs and creates a role
        let req = test::TestRequest::post()
            .uri("/api/admin/role/create/role")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .set_json(serde_json::json!({ "name": "Editors", "permissions": [] }))
            .to_request();
        let status = request_status(&app, req).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[actix_web::test]
    async fn test_query_string_does_not_affect_gate() {
        let (state, token) = test_state(&[("list", true)]).await;
        let app = test_app!(state);

        let status = request_status(
            &app,
            get("/api/admin/role/all/role?page=2", &token).to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_baseline_routes_always_reachable() {
        let (state, token) = test_state(&[]).await;
        let app = test_app!(state);

        for uri in [
            "/api/admin/dashboard",
            "/api/admin/profile",
            "/api/admin/dashboard-user/role",
        ] {
            let status = request_status(&app, get(uri, &token).to_request()).await;
            assert_eq!(status, StatusCode::OK, "baseline route {} not reachable", uri);
        }
    }

    #[actix_web::test]
    async fn test_role_details_returns_selection() {
        let (state, token) = test_state(&[("create", true)]).await;
        let app = test_app!(state);

        let response =
            test::call_service(&app, get("/dashboard-user/role/details", &token).to_request())
                .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["name"], "Gatekeeper");
        // Introspection exposes the raw selection, not the compiled routes.
        assert!(body["data"]["permissions"].is_array());
        assert!(body["data"].get("routes").is_none());
    }

    #[actix_web::test]
    async fn test_revocation_applies_on_next_request() {
        let (state, token) = test_state(&[("list", true)]).await;
        let app = test_app!(state);

        let status = request_status(&app, get("/api/admin/role/all/role", &token).to_request()).await;
        assert_eq!(status, StatusCode::OK);

        // Drop the grant through the manager, as the update endpoint would.
        let role_id = state
            .storage
            .db()
            .find_role_by_name("Gatekeeper")
            .await
            .unwrap()
            .unwrap()
            .id;
        state
            .roles
            .update_role(role_id, "Gatekeeper", grants(&[("list", false)]), None)
            .await
            .unwrap();

        // No cache sits between the gate and the store.
        let status = request_status(&app, get("/api/admin/role/all/role", &token).to_request()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_deleted_role_fails_closed() {
        let (state, token) = test_state(&[("list", true)]).await;
        let app = test_app!(state);

        let role_id = state
            .storage
            .db()
            .find_role_by_name("Gatekeeper")
            .await
            .unwrap()
            .unwrap()
            .id;
        state.roles.soft_delete_role(role_id).await.unwrap();

        let status = request_status(&app, get("/api/admin/role/all/role", &token).to_request()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
