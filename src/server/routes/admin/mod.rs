//! Administrative dashboard endpoints
//!
//! Everything under `/api/admin` runs behind the dashboard gate: the
//! principal's role is re-read and its compiled route set matched against
//! the request path on every call. Bootstrap endpoints stay reachable
//! because the baseline routes are part of every compiled set.

pub mod dashboard;
pub mod roles;
pub mod users;

use crate::server::middleware::DashboardGate;
use actix_web::web;

/// Configure the administrative dashboard routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/admin")
            .wrap(DashboardGate)
            .configure(roles::configure)
            .configure(users::configure)
            .configure(dashboard::configure),
    );
}
