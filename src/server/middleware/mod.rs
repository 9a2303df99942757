//! HTTP middleware

pub mod auth;
pub mod dashboard;
pub mod helpers;

pub use auth::{request_principal, AuthMiddleware};
pub use dashboard::DashboardGate;
