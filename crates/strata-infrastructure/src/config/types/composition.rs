//! Composition engine configuration types

use serde::{Deserialize, Serialize};
use strata_domain::constants::DEFAULT_BUILTIN_NAMESPACE;

/// Composition engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositionConfig {
    /// Condition tags active for this process
    pub active_conditions: Vec<String>,

    /// Namespace of the platform's built-in types
    pub builtin_namespace: String,

    /// Scan the type catalog for constraint-satisfying generic arguments
    pub scan_type_universe: bool,

    /// Treat open generics with more than one parameter as a configuration error
    pub strict_arity: bool,

    /// Allow keyed decorators and composites in the in-memory container
    pub keyed_layers: bool,
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            active_conditions: Vec::new(),
            builtin_namespace: DEFAULT_BUILTIN_NAMESPACE.to_string(),
            scan_type_universe: true,
            strict_arity: false,
            keyed_layers: true,
        }
    }
}
