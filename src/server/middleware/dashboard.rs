//! Dashboard authorization middleware
//!
//! Matches each request path against the compiled route set of the
//! principal's role. The role is re-read from storage on every request, so a
//! permission change or soft delete takes effect on the very next call from
//! any session; correctness never depends on a warm cache.

use crate::auth::rbac::authorize;
use crate::auth::Principal;
use crate::server::state::AppState;
use crate::utils::error::AppError;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::{web, HttpMessage};
use futures::future::{ready, Ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use tracing::debug;

/// Route authorization middleware for the administrative dashboard
pub struct DashboardGate;

impl<S, B> Transform<S, ServiceRequest> for DashboardGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = DashboardGateService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(DashboardGateService {
            service: Rc::new(service),
        }))
    }
}

/// Service implementation for the dashboard gate
pub struct DashboardGateService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for DashboardGateService<S>
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
        if req.method() == Method::OPTIONS {
            return Box::pin(self.service.call(req));
        }

        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let state = req
                .app_data::<web::Data<AppState>>()
                .cloned()
                .ok_or_else(|| AppError::internal("Missing application state"))?;

            let principal = req.extensions().get::<Principal>().cloned();
            let principal =
                principal.ok_or_else(|| AppError::unauthorized("No authenticated principal"))?;

            // A storage failure propagates as an error response here; it must
            // never degrade into a policy denial.
            let current_role = state
                .storage
                .db()
                .find_role_by_id(principal.role_id())
                .await?
                .ok_or_else(|| AppError::forbidden("Role not found"))?;

            if !authorize(Some(&current_role.routes), req.path()).is_allowed() {
                debug!(
                    user = %principal.user.id,
                    role = %current_role.id,
                    path = %req.path(),
                    "dashboard route denied"
                );
                return Err(AppError::forbidden("Access to this dashboard route is denied").into());
            }

            service.call(req).await
        })
    }
}
