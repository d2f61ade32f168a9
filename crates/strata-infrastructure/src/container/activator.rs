//! Activators
//!
//! The engine never constructs anything itself. Each implementation
//! definition gets an activator: a closure that builds an [`Instance`] from
//! an [`ActivationContext`]. Activators are registered explicitly or through
//! the [`ACTIVATORS`] distributed slice.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use strata_domain::error::Result;
use strata_domain::value_objects::{TypeName, TypeRef};

use super::instance::Instance;
use super::provider::ServiceProvider;

/// Inputs available to an activator
pub struct ActivationContext<'a> {
    implementation: &'a TypeRef,
    service: &'a TypeRef,
    provider: &'a ServiceProvider,
    inner: Vec<Instance>,
}

impl<'a> ActivationContext<'a> {
    pub(crate) fn new(
        implementation: &'a TypeRef,
        service: &'a TypeRef,
        provider: &'a ServiceProvider,
        inner: Vec<Instance>,
    ) -> Self {
        Self {
            implementation,
            service,
            provider,
            inner,
        }
    }

    /// Closed implementation type being constructed
    pub fn implementation(&self) -> &TypeRef {
        self.implementation
    }

    /// Service type being resolved
    pub fn service(&self) -> &TypeRef {
        self.service
    }

    /// Generic argument `position` of the implementation
    pub fn argument(&self, position: usize) -> Option<&TypeRef> {
        self.implementation.arguments().get(position)
    }

    /// Provider, for resolving further dependencies
    pub fn provider(&self) -> &ServiceProvider {
        self.provider
    }

    /// Instance a decorator wraps
    pub fn inner(&self) -> Option<&Instance> {
        self.inner.first()
    }

    /// Instances a composite aggregates
    pub fn inners(&self) -> &[Instance] {
        &self.inner
    }
}

/// Constructor closure
pub type ActivatorFn = Arc<dyn Fn(&ActivationContext<'_>) -> Result<Instance> + Send + Sync>;

/// Statically linked activator
///
/// # Example
///
/// ```ignore
/// #[linkme::distributed_slice(ACTIVATORS)]
/// static BATTERY: ActivatorEntry = ActivatorEntry {
///     namespace: "Shop",
///     name: "Battery",
///     arity: 0,
///     activate: |_| Ok(Instance::new(Battery)),
/// };
/// ```
pub struct ActivatorEntry {
    /// Namespace of the implementation
    pub namespace: &'static str,
    /// Simple name of the implementation
    pub name: &'static str,
    /// Generic arity of the implementation definition
    pub arity: usize,
    /// Constructor
    pub activate: fn(&ActivationContext<'_>) -> Result<Instance>,
}

// Auto-collection via linkme distributed slices - activators submit entries at compile time
#[linkme::distributed_slice]
pub static ACTIVATORS: [ActivatorEntry] = [..];

/// Activators keyed by implementation definition
///
/// A generic definition has one activator for every closed form; it reads
/// the arguments from [`ActivationContext::argument`].
#[derive(Clone, Default)]
pub struct ActivatorRegistry {
    activators: HashMap<TypeName, ActivatorFn>,
}

impl ActivatorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every linked [`ACTIVATORS`] entry
    pub fn from_linked() -> Self {
        let mut registry = Self::new();
        for entry in ACTIVATORS.iter() {
            let activate = entry.activate;
            registry.register(
                TypeName::generic(entry.namespace, entry.name, entry.arity),
                move |ctx: &ActivationContext<'_>| activate(ctx),
            );
        }
        registry
    }

    /// Register the activator for `definition`, replacing any previous one
    pub fn register<F>(&mut self, definition: TypeName, activate: F)
    where
        F: Fn(&ActivationContext<'_>) -> Result<Instance> + Send + Sync + 'static,
    {
        self.activators.insert(definition, Arc::new(activate));
    }

    /// Builder-style [`register`](Self::register)
    pub fn with<F>(mut self, definition: TypeName, activate: F) -> Self
    where
        F: Fn(&ActivationContext<'_>) -> Result<Instance> + Send + Sync + 'static,
    {
        self.register(definition, activate);
        self
    }

    /// Activator for the definition behind `implementation`
    pub fn get(&self, implementation: &TypeRef) -> Option<&ActivatorFn> {
        implementation
            .definition()
            .and_then(|name| self.activators.get(name))
    }

    /// Number of registered definitions
    pub fn len(&self) -> usize {
        self.activators.len()
    }

    /// Whether no activator is registered
    pub fn is_empty(&self) -> bool {
        self.activators.is_empty()
    }
}

impl fmt::Debug for ActivatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<String> = self.activators.keys().map(ToString::to_string).collect();
        names.sort();
        f.debug_struct("ActivatorRegistry")
            .field("activators", &names)
            .finish()
    }
}
