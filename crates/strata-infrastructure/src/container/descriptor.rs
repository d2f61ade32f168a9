//! Service descriptors owned by [`ServiceCollection`](super::ServiceCollection)

use std::fmt;
use std::sync::Arc;

use strata_domain::ports::LayerDescriptor;
use strata_domain::value_objects::{Lifetime, ServiceKey, TypeRef};

/// Identity used to cache instances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DescriptorId(pub u64);

impl fmt::Display for DescriptorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a descriptor produces its instance
#[derive(Debug, Clone)]
pub enum Activation {
    /// Run the implementation's activator
    Type {
        /// Implementation constructed
        implementation: TypeRef,
    },
    /// Resolve the implementation's own registration
    Forward {
        /// Implementation resolved
        implementation: TypeRef,
    },
    /// Construct `implementation` around the instance of `inner`
    Decorator {
        /// Decorator type
        implementation: TypeRef,
        /// Wrapped descriptor
        inner: Arc<ServiceDescriptor>,
    },
    /// Construct `implementation` from the instances of every `inner`
    Composite {
        /// Composite type
        implementation: TypeRef,
        /// Aggregated descriptors, in registration order
        inner: Vec<Arc<ServiceDescriptor>>,
    },
}

impl Activation {
    /// Type this activation constructs or forwards to
    pub fn implementation(&self) -> &TypeRef {
        match self {
            Self::Type { implementation }
            | Self::Forward { implementation }
            | Self::Decorator { implementation, .. }
            | Self::Composite { implementation, .. } => implementation,
        }
    }
}

/// One way of constructing a service
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    /// Cache identity
    pub id: DescriptorId,
    /// Service type resolved through this descriptor
    pub service_type: TypeRef,
    /// Registration key
    pub key: Option<ServiceKey>,
    /// Instance lifetime
    pub lifetime: Lifetime,
    /// Construction strategy
    pub activation: Activation,
}

impl ServiceDescriptor {
    /// Whether the descriptor matches `service` under `key`
    pub fn matches(&self, service: &TypeRef, key: Option<&ServiceKey>) -> bool {
        &self.service_type == service && self.key.as_ref() == key
    }
}

impl LayerDescriptor for ServiceDescriptor {
    fn key(&self) -> Option<&ServiceKey> {
        self.key.as_ref()
    }

    fn lifetime(&self) -> Lifetime {
        self.lifetime
    }
}
