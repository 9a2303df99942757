//! Authentication middleware
//!
//! Resolves the principal behind each request and stores it in the request
//! extensions for downstream middleware and handlers. Verification failures
//! answer 401; storage failures keep their own error class.

use crate::auth::Principal;
use crate::server::middleware::helpers::{extract_bearer_token, is_public_route};
use crate::server::state::AppState;
use crate::utils::error::AppError;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::{web, HttpMessage, HttpRequest};
use futures::future::{ready, Ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use tracing::debug;

/// Auth middleware for Actix-web
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

/// Service implementation for auth middleware
pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // CORS preflights carry no credentials.
        if req.method() == Method::OPTIONS || is_public_route(req.path()) {
            return Box::pin(self.service.call(req));
        }

        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let state = req
                .app_data::<web::Data<AppState>>()
                .cloned()
                .ok_or_else(|| AppError::internal("Missing application state"))?;

            let token = extract_bearer_token(req.headers())
                .ok_or_else(|| AppError::unauthorized("No token provided"))?;

            let principal = state.auth.resolve(&token).await?;
            debug!(user = %principal.user.id, path = %req.path(), "request authenticated");
            req.extensions_mut().insert(principal);

            service.call(req).await
        })
    }
}

/// Extract the resolved principal from a request.
pub fn request_principal(req: &HttpRequest) -> Result<Principal, AppError> {
    req.extensions()
        .get::<Principal>()
        .cloned()
        .ok_or_else(|| AppError::unauthorized("No authenticated principal"))
}
