//! Domain layer constants

/// Namespace holding the platform's built-in types.
///
/// Interfaces from this namespace never become service types when a record
/// falls back to interface discovery.
pub const DEFAULT_BUILTIN_NAMESPACE: &str = "System";

/// Name of the universal top type inside the built-in namespace
pub const OBJECT_TYPE_NAME: &str = "Object";

/// Order assigned to records that do not specify one
pub const DEFAULT_ORDER: i32 = 0;

/// Condition label used for records without conditions
pub const UNCONDITIONAL_LABEL: &str = "(always)";

/// Separator used when rendering several condition tags in one label
pub const CONDITION_LABEL_SEPARATOR: &str = "|";
