//! Permission catalog
//!
//! Static reference data mapping `(module, action)` to concrete route
//! patterns. Loaded once at process start from a YAML document of the form
//! `module -> { action -> { route: string | [string] } }`; a malformed
//! document aborts startup. The catalog exposes no mutation operation and is
//! passed explicitly to the compiler and callers that need it.

use crate::utils::error::{AppError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use super::matcher::RoutePattern;

/// A `route:` value in the catalog document: one pattern or a list
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RouteSpec {
    One(String),
    Many(Vec<String>),
}

impl RouteSpec {
    fn into_vec(self) -> Vec<String> {
        match self {
            RouteSpec::One(route) => vec![route],
            RouteSpec::Many(routes) => routes,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ActionSpec {
    route: RouteSpec,
}

type CatalogDocument = BTreeMap<String, BTreeMap<String, ActionSpec>>;

/// Validated, immutable permission catalog
#[derive(Debug, Clone, Default)]
pub struct PermissionCatalog {
    modules: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl PermissionCatalog {
    /// Load the catalog from a YAML file. Any error here is startup-fatal.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::config(format!(
                "Failed to read permission catalog {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a catalog from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let document: CatalogDocument = serde_yaml::from_str(content).map_err(|e| {
            AppError::config(format!("Failed to parse permission catalog: {}", e))
        })?;
        Self::from_document(document)
    }

    fn from_document(document: CatalogDocument) -> Result<Self> {
        let mut modules: BTreeMap<String, BTreeMap<String, Vec<String>>> = BTreeMap::new();

        for (module_key, actions) in document {
            // Module keys are matched case-insensitively; fold once at load.
            let folded = module_key.to_lowercase();

            let mut table: BTreeMap<String, Vec<String>> = BTreeMap::new();
            for (action_key, spec) in actions {
                let routes = spec.route.into_vec();
                if routes.is_empty() {
                    return Err(AppError::config(format!(
                        "Catalog module '{}' action '{}' has an empty route list",
                        folded, action_key
                    )));
                }
                for route in &routes {
                    RoutePattern::parse(route).map_err(|e| {
                        AppError::config(format!(
                            "Catalog module '{}' action '{}': invalid route pattern '{}': {}",
                            folded, action_key, route, e
                        ))
                    })?;
                }
                table.insert(action_key, routes);
            }

            if modules.insert(folded.clone(), table).is_some() {
                return Err(AppError::config(format!(
                    "Catalog contains duplicate module key '{}'",
                    folded
                )));
            }
        }

        Ok(Self { modules })
    }

    /// Route patterns for `(module, action)`, or `None` when either key is
    /// unknown. `module_key` must already be lowercase.
    pub fn lookup(&self, module_key: &str, action_key: &str) -> Option<&[String]> {
        self.modules
            .get(module_key)?
            .get(action_key)
            .map(|routes| routes.as_slice())
    }

    /// Whether a (lowercase) module key exists in the catalog.
    pub fn contains_module(&self, module_key: &str) -> bool {
        self.modules.contains_key(module_key)
    }

    /// Iterate over the catalog's module keys.
    pub fn module_keys(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_and_list_routes() {
        let catalog = PermissionCatalog::from_yaml(
            r#"
role:
  create:
    route: /api/admin/role/create/role
user:
  list:
    route:
      - /api/admin/users/list
      - /api/admin/business/users/list
"#,
        )
        .unwrap();

        assert_eq!(
            catalog.lookup("role", "create"),
            Some(&["/api/admin/role/create/role".to_string()][..])
        );
        assert_eq!(catalog.lookup("user", "list").map(<[String]>::len), Some(2));
        assert_eq!(catalog.lookup("role", "nope"), None);
        assert_eq!(catalog.lookup("nope", "create"), None);
    }

    #[test]
    fn test_module_keys_folded_to_lowercase() {
        let catalog = PermissionCatalog::from_yaml(
            r#"
Role:
  create:
    route: /api/admin/role/create/role
"#,
        )
        .unwrap();

        assert!(catalog.contains_module("role"));
        assert!(!catalog.contains_module("Role"));
    }

    #[test]
    fn test_duplicate_module_after_folding_is_fatal() {
        let result = PermissionCatalog::from_yaml(
            r#"
Role:
  create:
    route: /api/admin/role/create/role
role:
  list:
    route: /api/admin/role/all/role
"#,
        );
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_empty_route_list_is_fatal() {
        let result = PermissionCatalog::from_yaml(
            r#"
role:
  create:
    route: []
"#,
        );
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_invalid_route_pattern_is_fatal() {
        let result = PermissionCatalog::from_yaml(
            r#"
role:
  create:
    route: api/admin/role/create/role
"#,
        );
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_malformed_document_is_fatal() {
        assert!(matches!(
            PermissionCatalog::from_yaml("just a string"),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            PermissionCatalog::from_yaml("role:\n  create: 42"),
            Err(AppError::Config(_))
        ));
    }
}
