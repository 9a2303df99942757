//! Permission-to-route compilation
//!
//! Turns an administrator's nested selection of allowed actions into the
//! concrete set of route patterns a role may reach. Compilation is pure:
//! no I/O, no side effects, identical input yields identical output.

use std::collections::HashSet;

use super::catalog::PermissionCatalog;
use super::types::PermissionSelection;

/// Routes every authenticated dashboard principal can reach regardless of
/// grants, so a client can always bootstrap.
pub const BASELINE_ROUTES: &[&str] = &[
    "/api/auth/admin-login",
    "/api/auth/admin-forgot-password",
    "/api/auth/admin-reset-password",
    "/api/admin/dashboard-user/role",
    "/dashboard-user/role/details",
    "/api/admin/dashboard",
    "/api/admin/profile",
];

/// Compile a permission selection into a deduplicated route set.
///
/// Module names are matched against the catalog case-insensitively; unknown
/// module or action keys are skipped, never rejected. The result keeps
/// first-insertion order and always contains the baseline routes, so an
/// empty selection compiles to exactly the baseline set.
pub fn compile(catalog: &PermissionCatalog, selection: &PermissionSelection) -> Vec<String> {
    let mut routes: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for grant in selection {
        let module_key = grant.module.to_lowercase();
        if !catalog.contains_module(&module_key) {
            continue;
        }
        for submodule in &grant.submodules {
            for (action_key, allowed) in &submodule.actions {
                if !allowed {
                    continue;
                }
                let Some(patterns) = catalog.lookup(&module_key, action_key) else {
                    continue;
                };
                for pattern in patterns {
                    if seen.insert(pattern.clone()) {
                        routes.push(pattern.clone());
                    }
                }
            }
        }
    }

    for baseline in BASELINE_ROUTES {
        if seen.insert((*baseline).to_string()) {
            routes.push((*baseline).to_string());
        }
    }

    routes
}
