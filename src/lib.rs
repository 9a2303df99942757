//! # commune-rs
//!
//! Backend for a chat/social application's administrative dashboard with
//! role-based access control.
//!
//! Most of the service is thin data-access glue; the core is the role
//! permission subsystem in [`auth::rbac`]:
//!
//! - a **permission catalog** loaded once at startup, mapping
//!   `(module, action)` to concrete route patterns,
//! - a pure **route compiler** turning an admin-authored permission
//!   selection into the deduplicated set of reachable routes (always
//!   including a fixed baseline so clients can bootstrap),
//! - an **authorization gate** matching each request path against the
//!   principal's compiled route set, re-read from storage on every request.
//!
//! ## Running the server
//!
//! ```rust,no_run
//! use commune_rs::server::builder::run_server;
//!
//! #[tokio::main]
//! async fn main() -> commune_rs::Result<()> {
//!     // Loads config/commune.yaml and config/permissions.yaml
//!     run_server().await
//! }
//! ```
//!
//! ## Compiling and checking permissions directly
//!
//! ```rust
//! use commune_rs::{authorize, compile, Decision, PermissionCatalog};
//!
//! let catalog = PermissionCatalog::from_yaml(
//!     "role:\n  create:\n    route: /api/admin/role/create/role\n",
//! )?;
//! let routes = compile(&catalog, &Vec::new());
//! assert_eq!(authorize(Some(&routes), "/api/admin/dashboard"), Decision::Allow);
//! # Ok::<(), commune_rs::AppError>(())
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use auth::rbac::{authorize, compile, Decision, PermissionCatalog, BASELINE_ROUTES};
pub use config::Config;
pub use utils::error::{AppError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
