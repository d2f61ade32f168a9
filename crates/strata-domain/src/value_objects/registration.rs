//! Registration records
//!
//! A [`RegistrationRecord`] is the immutable input unit of the engine: one
//! candidate implementation with everything needed to decide whether, how and
//! under which service types it gets registered.

use crate::constants::DEFAULT_ORDER;
use crate::error::{Error, Result};
use crate::value_objects::types::TypeRef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Service lifetime controlling instance sharing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifetime {
    /// One instance for the whole container
    Singleton,
    /// One instance per scope
    Scoped,
    /// A new instance per resolution
    #[default]
    Transient,
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Singleton => "singleton",
            Self::Scoped => "scoped",
            Self::Transient => "transient",
        };
        f.write_str(name)
    }
}

/// Which service types a record is exposed as when it declares no aliases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AliasFallbackPolicy {
    /// Only the implementation type itself
    SelfOnly,
    /// Every implemented interface outside the built-in namespace
    InterfacesOnly,
    /// The implementation type followed by its interfaces
    #[default]
    SelfWithInterfaces,
}

/// What happens when a `(service, key)` pair is registered twice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail with a configuration error
    Throw,
    /// Keep the existing registration
    Skip,
    /// Remove existing registrations and keep the new one
    Replace,
    /// Keep both
    #[default]
    Add,
}

/// How a dispatch composite combines several matched implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationMode {
    /// Every implementation runs; boolean results are AND-ed
    #[default]
    All,
    /// Stops at the first success; boolean results are OR-ed
    Any,
    /// Every implementation runs in registration order
    Sequential,
}

impl AggregationMode {
    /// Boolean result when no implementation matched
    pub fn default_bool(self) -> bool {
        match self {
            Self::All | Self::Sequential => true,
            Self::Any => false,
        }
    }
}

/// Opaque registration key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServiceKey {
    /// Numeric key
    Number(i64),
    /// Textual key
    Text(String),
}

impl From<&str> for ServiceKey {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ServiceKey {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ServiceKey {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

fn default_order() -> i32 {
    DEFAULT_ORDER
}

fn default_true() -> bool {
    true
}

/// One candidate registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    /// Type constructed for this registration
    pub implementation_type: TypeRef,
    /// Instance lifetime
    #[serde(default)]
    pub lifetime: Lifetime,
    /// Explicit service types, in declaration order
    #[serde(default)]
    pub service_type_aliases: Vec<TypeRef>,
    /// Fallback used when `service_type_aliases` is empty
    #[serde(default)]
    pub alias_fallback_policy: AliasFallbackPolicy,
    /// Optional registration key
    #[serde(default)]
    pub key: Option<ServiceKey>,
    /// Layer ordering; higher values wrap outward
    #[serde(default = "default_order")]
    pub order: i32,
    /// Condition tags; empty means always active
    #[serde(default)]
    pub conditions: BTreeSet<String>,
    /// Wraps existing registrations of its service types
    #[serde(default)]
    pub is_decorator: bool,
    /// Aggregates existing registrations of its service types
    #[serde(default)]
    pub is_composite: bool,
    /// Composite that routes by runtime argument type
    #[serde(default)]
    pub is_dispatcher: bool,
    /// Aggregation used by dispatch composites
    #[serde(default)]
    pub dispatch_mode: AggregationMode,
    /// Whether dispatch composites hold every matching implementation or only one
    #[serde(default = "default_true")]
    pub dispatch_multiple: bool,
    /// Dependencies of the implementation, used for diagnostics and
    /// open-generic discovery
    #[serde(default)]
    pub required_types: Vec<TypeRef>,
    /// Include in exported diagrams
    #[serde(default)]
    pub export_for_visualization: bool,
    /// Behaviour on duplicate `(service, key)` registration
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
    /// Module the record was declared in
    #[serde(default)]
    pub origin_assembly: String,
    /// Namespace the record was declared in
    #[serde(default)]
    pub origin_namespace: String,
    /// Shared with other modules
    #[serde(default)]
    pub use_public: bool,
}

impl RegistrationRecord {
    /// Start building a record for `implementation_type`
    pub fn builder(implementation_type: TypeRef) -> RegistrationRecordBuilder {
        RegistrationRecordBuilder::new(implementation_type)
    }

    /// Check the record's own invariants
    pub fn validate(&self) -> Result<()> {
        match &self.implementation_type {
            TypeRef::Parameter { .. } => {
                return Err(Error::invalid_argument(
                    "implementation type must be a named type, not a generic parameter",
                ));
            }
            TypeRef::Named { definition, .. } if definition.name.trim().is_empty() => {
                return Err(Error::invalid_argument("implementation type name is empty"));
            }
            TypeRef::Named { .. } => {}
        }
        if self.is_decorator && self.is_composite {
            return Err(Error::invalid_argument(format!(
                "'{}' cannot be both a decorator and a composite",
                self.implementation_type
            )));
        }
        if self.is_dispatcher && !self.is_composite {
            return Err(Error::invalid_argument(format!(
                "'{}' is marked as dispatcher but not as composite",
                self.implementation_type
            )));
        }
        Ok(())
    }

    /// Decorators and non-dispatching composites
    pub fn is_layer(&self) -> bool {
        self.is_decorator || (self.is_composite && !self.is_dispatcher)
    }

    /// Everything that is registered directly against its service types
    pub fn is_base(&self) -> bool {
        !self.is_layer()
    }

    /// Composite that aggregates, as opposed to dispatching
    pub fn is_aggregating_composite(&self) -> bool {
        self.is_composite && !self.is_dispatcher
    }

    /// Rendered implementation type, used for ordering and messages
    pub fn implementation_name(&self) -> String {
        self.implementation_type.to_string()
    }

    /// Copy of this record closed over concrete types
    pub fn closed_over(&self, implementation_type: TypeRef, aliases: Vec<TypeRef>) -> Self {
        Self {
            implementation_type,
            service_type_aliases: aliases,
            ..self.clone()
        }
    }
}

/// Builder for [`RegistrationRecord`]
#[derive(Debug, Clone)]
pub struct RegistrationRecordBuilder {
    record: RegistrationRecord,
}

impl RegistrationRecordBuilder {
    /// Create a builder with default settings
    pub fn new(implementation_type: TypeRef) -> Self {
        Self {
            record: RegistrationRecord {
                implementation_type,
                lifetime: Lifetime::default(),
                service_type_aliases: Vec::new(),
                alias_fallback_policy: AliasFallbackPolicy::default(),
                key: None,
                order: DEFAULT_ORDER,
                conditions: BTreeSet::new(),
                is_decorator: false,
                is_composite: false,
                is_dispatcher: false,
                dispatch_mode: AggregationMode::default(),
                dispatch_multiple: true,
                required_types: Vec::new(),
                export_for_visualization: false,
                duplicate_policy: DuplicatePolicy::default(),
                origin_assembly: String::new(),
                origin_namespace: String::new(),
                use_public: false,
            },
        }
    }

    /// Set the lifetime
    pub fn lifetime(mut self, lifetime: Lifetime) -> Self {
        self.record.lifetime = lifetime;
        self
    }

    /// Add an explicit service type
    pub fn alias(mut self, service_type: TypeRef) -> Self {
        self.record.service_type_aliases.push(service_type);
        self
    }

    /// Set the fallback policy used without explicit aliases
    pub fn fallback(mut self, policy: AliasFallbackPolicy) -> Self {
        self.record.alias_fallback_policy = policy;
        self
    }

    /// Set the registration key
    pub fn key(mut self, key: impl Into<ServiceKey>) -> Self {
        self.record.key = Some(key.into());
        self
    }

    /// Set the layer order
    pub fn order(mut self, order: i32) -> Self {
        self.record.order = order;
        self
    }

    /// Add a condition tag
    pub fn condition(mut self, tag: impl Into<String>) -> Self {
        self.record.conditions.insert(tag.into());
        self
    }

    /// Mark as decorator
    pub fn decorator(mut self) -> Self {
        self.record.is_decorator = true;
        self
    }

    /// Mark as aggregating composite
    pub fn composite(mut self) -> Self {
        self.record.is_composite = true;
        self
    }

    /// Mark as dispatch composite
    pub fn dispatcher(mut self, mode: AggregationMode, multiple: bool) -> Self {
        self.record.is_composite = true;
        self.record.is_dispatcher = true;
        self.record.dispatch_mode = mode;
        self.record.dispatch_multiple = multiple;
        self
    }

    /// Add a required dependency type
    pub fn requires(mut self, required: TypeRef) -> Self {
        self.record.required_types.push(required);
        self
    }

    /// Include in exported diagrams
    pub fn export_for_visualization(mut self) -> Self {
        self.record.export_for_visualization = true;
        self
    }

    /// Set the duplicate policy
    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.record.duplicate_policy = policy;
        self
    }

    /// Set where the record was declared
    pub fn origin(mut self, assembly: impl Into<String>, namespace: impl Into<String>) -> Self {
        self.record.origin_assembly = assembly.into();
        self.record.origin_namespace = namespace.into();
        self
    }

    /// Share with other modules
    pub fn public(mut self) -> Self {
        self.record.use_public = true;
        self
    }

    /// Validate and return the record
    pub fn build(self) -> Result<RegistrationRecord> {
        self.record.validate()?;
        Ok(self.record)
    }
}
