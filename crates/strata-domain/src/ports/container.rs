//! Container adapter port
//!
//! The narrow capability set the layering engine needs from a concrete
//! container. Descriptors are owned by the adapter; the engine only folds
//! them through the adapter's own `describe_*` methods.

use crate::error::{Error, Result};
use crate::value_objects::registration::{DuplicatePolicy, Lifetime, RegistrationRecord, ServiceKey};
use crate::value_objects::types::TypeRef;
use std::fmt;
use std::str::FromStr;

/// How a base registration is materialized by the adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationKind {
    /// Construct the implementation for the service type
    Direct,
    /// Resolve the service through the implementation's own registration
    Forward,
}

impl FromStr for RegistrationKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "forward" => Ok(Self::Forward),
            _ => Err(Error::unknown_registration_kind(value)),
        }
    }
}

impl fmt::Display for RegistrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => f.write_str("direct"),
            Self::Forward => f.write_str("forward"),
        }
    }
}

/// One base registration call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseRegistrationRequest {
    /// Service type being registered
    pub service_type: TypeRef,
    /// Implementation constructed (or forwarded to)
    pub implementation_type: TypeRef,
    /// Instance lifetime
    pub lifetime: Lifetime,
    /// Behaviour when `(service_type, key)` already exists
    pub duplicate_policy: DuplicatePolicy,
    /// Direct construction or forwarding
    pub kind: RegistrationKind,
    /// Optional key
    pub key: Option<ServiceKey>,
}

/// Descriptor properties the layering engine needs to read
pub trait LayerDescriptor: Clone {
    /// Registration key
    fn key(&self) -> Option<&ServiceKey>;

    /// Instance lifetime
    fn lifetime(&self) -> Lifetime;
}

/// Container capabilities consumed by the layering engine
pub trait ContainerAdapter {
    /// Adapter-owned unit of "how to construct this service"
    type Descriptor: LayerDescriptor;

    /// Adapter name used in error messages
    fn name(&self) -> &str;

    /// Register a base implementation; `Ok(false)` when skipped by policy
    fn try_add_base_registration(&mut self, request: &BaseRegistrationRequest) -> Result<bool>;

    /// Whether keyed decorators and composites can be applied
    fn supports_keyed_layers(&self) -> bool;

    /// Current descriptors of `service`, in registration order
    fn descriptors_for_service(&self, service: &TypeRef) -> Vec<Self::Descriptor>;

    /// Replace every descriptor of `service`
    fn replace_descriptors_for_service(&mut self, service: &TypeRef, descriptors: Vec<Self::Descriptor>);

    /// Descriptor constructing `decorator` around `previous`
    fn describe_decorator(
        &mut self,
        service: &TypeRef,
        previous: &Self::Descriptor,
        decorator: &RegistrationRecord,
    ) -> Result<Self::Descriptor>;

    /// Descriptor constructing `composite` from every `inner` descriptor
    fn describe_composite(
        &mut self,
        service: &TypeRef,
        composite: &RegistrationRecord,
        inner: &[Self::Descriptor],
        lifetime: Lifetime,
    ) -> Result<Self::Descriptor>;
}
