//! Request authorization gate
//!
//! Per-request decision: does a role's compiled route set reach the
//! requested path? The gate never blocks on I/O; the role lookup it depends
//! on is supplied by the caller.

use super::matcher::{strip_query, RoutePattern};

/// Authorization outcome
///
/// `Deny` is a normal policy result, not a failure: upstream errors must be
/// surfaced as errors by the caller, never collapsed into a denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Match a request path against a role's compiled route set.
///
/// A missing or empty route set denies every path. The query component of
/// the path is stripped before matching. Patterns form an unordered set: any
/// single match allows, and a stored pattern that cannot be parsed is
/// skipped so one corrupt entry never aborts the whole check.
pub fn authorize(compiled_routes: Option<&[String]>, request_path: &str) -> Decision {
    let Some(routes) = compiled_routes else {
        return Decision::Deny;
    };

    let path = strip_query(request_path);
    for stored in routes {
        match RoutePattern::parse(stored) {
            Ok(pattern) if pattern.matches(path) => return Decision::Allow,
            _ => {}
        }
    }
    Decision::Deny
}
