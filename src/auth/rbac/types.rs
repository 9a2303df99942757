//! Permission selection types
//!
//! The admin-authored grant document: module -> submodules -> action flags.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Grant entry for a single module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleGrant {
    /// Module name; matched against catalog keys case-insensitively
    pub module: String,
    /// Submodule grants
    #[serde(default)]
    pub submodules: Vec<SubmoduleGrant>,
}

/// Action flags for one submodule
///
/// The submodule name drives the admin UI only; route compilation keys off
/// module and action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmoduleGrant {
    /// Submodule display name
    pub name: String,
    /// Action flags keyed by catalog action key
    #[serde(default)]
    pub actions: BTreeMap<String, bool>,
}

/// The full permission selection of a role, as authored by an administrator
pub type PermissionSelection = Vec<ModuleGrant>;

impl ModuleGrant {
    /// Convenience constructor for a module with a single submodule.
    pub fn single(
        module: impl Into<String>,
        submodule: impl Into<String>,
        actions: BTreeMap<String, bool>,
    ) -> Self {
        Self {
            module: module.into(),
            submodules: vec![SubmoduleGrant {
                name: submodule.into(),
                actions,
            }],
        }
    }
}
