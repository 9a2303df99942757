//! Role permission compilation and request authorization
//!
//! The security-critical core of the dashboard: a static catalog maps
//! `(module, action)` to route patterns, the compiler turns an admin-authored
//! permission selection into a concrete route set, and the gate decides per
//! request whether a role's compiled set reaches the requested path.

mod catalog;
mod compiler;
mod gate;
mod matcher;
mod types;

// Re-export public types and functions
pub use catalog::PermissionCatalog;
pub use compiler::{compile, BASELINE_ROUTES};
pub use gate::{authorize, Decision};
pub use matcher::{strip_query, PatternError, RoutePattern};
pub use types::{ModuleGrant, PermissionSelection, SubmoduleGrant};
