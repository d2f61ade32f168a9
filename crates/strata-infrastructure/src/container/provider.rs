//! Service provider
//!
//! Resolves descriptors built by [`ServiceCollection`](super::ServiceCollection).
//! Singletons are cached in the root scope, scoped instances per scope, and
//! transients are never cached. The cache is a [`DashMap`]; construction runs
//! outside any shard lock and the first stored instance wins a race.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use strata_domain::error::{Error, Result};
use strata_domain::value_objects::{Lifetime, ServiceKey, TypeRef};
use tracing::trace;

use super::activator::{ActivationContext, ActivatorRegistry};
use super::descriptor::{Activation, DescriptorId, ServiceDescriptor};
use super::instance::Instance;
use crate::constants::ROOT_SCOPE_ID;

/// Identity of a resolution scope
pub type ScopeId = u64;

/// Instances keyed by descriptor and scope
#[derive(Debug, Default)]
struct InstanceCache {
    entries: DashMap<(DescriptorId, ScopeId), Instance>,
}

impl InstanceCache {
    fn get_or_create<F>(&self, key: (DescriptorId, ScopeId), create: F) -> Result<Instance>
    where
        F: FnOnce() -> Result<Instance>,
    {
        if let Some(cached) = self.entries.get(&key) {
            return Ok(cached.value().clone());
        }
        let created = create()?;
        let stored = self.entries.entry(key).or_insert(created).value().clone();
        Ok(stored)
    }

    fn clear_scope(&self, scope: ScopeId) {
        self.entries.retain(|(_, s), _| *s != scope);
    }
}

#[derive(Debug)]
struct ProviderState {
    descriptors: Vec<ServiceDescriptor>,
    activators: ActivatorRegistry,
    cache: InstanceCache,
    next_scope: AtomicU64,
}

/// Resolves services from a frozen descriptor list
///
/// Cloning is cheap; clones share descriptors and cache.
#[derive(Debug, Clone)]
pub struct ServiceProvider {
    state: Arc<ProviderState>,
    scope: ScopeId,
}

impl ServiceProvider {
    pub(crate) fn new(descriptors: Vec<ServiceDescriptor>, activators: ActivatorRegistry) -> Self {
        Self {
            state: Arc::new(ProviderState {
                descriptors,
                activators,
                cache: InstanceCache::default(),
                next_scope: AtomicU64::new(ROOT_SCOPE_ID + 1),
            }),
            scope: ROOT_SCOPE_ID,
        }
    }

    /// Scope this provider resolves scoped services in
    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    /// Provider over a fresh scope sharing this provider's singletons
    pub fn create_scope(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            scope: self.state.next_scope.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Drop every scoped instance cached for this provider's scope
    pub fn end_scope(&self) {
        if self.scope != ROOT_SCOPE_ID {
            self.state.cache.clear_scope(self.scope);
        }
    }

    /// Resolve the last unkeyed registration of `service`
    pub fn get(&self, service: &TypeRef) -> Result<Instance> {
        self.try_get(service)?
            .ok_or_else(|| Error::not_found(format!("service '{service}'")))
    }

    /// Resolve the last unkeyed registration of `service`, if any
    pub fn try_get(&self, service: &TypeRef) -> Result<Option<Instance>> {
        self.last(service, None)
            .map(|d| self.resolve(d))
            .transpose()
    }

    /// Resolve the last registration of `service` under `key`
    pub fn get_keyed(&self, service: &TypeRef, key: &ServiceKey) -> Result<Instance> {
        let descriptor = self
            .last(service, Some(key))
            .ok_or_else(|| Error::not_found(format!("service '{service}' with key '{key}'")))?;
        self.resolve(descriptor)
    }

    /// Resolve every unkeyed registration of `service`, in registration order
    pub fn get_all(&self, service: &TypeRef) -> Result<Vec<Instance>> {
        self.state
            .descriptors
            .iter()
            .filter(|d| d.matches(service, None))
            .map(|d| self.resolve(d))
            .collect()
    }

    /// Whether `service` has an unkeyed registration
    pub fn contains(&self, service: &TypeRef) -> bool {
        self.last(service, None).is_some()
    }

    fn last(&self, service: &TypeRef, key: Option<&ServiceKey>) -> Option<&ServiceDescriptor> {
        self.state
            .descriptors
            .iter()
            .rev()
            .find(|d| d.matches(service, key))
    }

    fn resolve(&self, descriptor: &ServiceDescriptor) -> Result<Instance> {
        match descriptor.lifetime {
            Lifetime::Singleton => self
                .state
                .cache
                .get_or_create((descriptor.id, ROOT_SCOPE_ID), || self.construct(descriptor)),
            Lifetime::Scoped => self
                .state
                .cache
                .get_or_create((descriptor.id, self.scope), || self.construct(descriptor)),
            Lifetime::Transient => self.construct(descriptor),
        }
    }

    fn construct(&self, descriptor: &ServiceDescriptor) -> Result<Instance> {
        let service = &descriptor.service_type;
        trace!(service = %service, descriptor = %descriptor.id, "Constructing instance");
        match &descriptor.activation {
            Activation::Type { implementation } => self.activate(implementation, service, Vec::new()),
            Activation::Forward { implementation } => {
                let target = self
                    .last(implementation, descriptor.key.as_ref())
                    .ok_or_else(|| {
                        Error::activation(
                            service.to_string(),
                            format!("forward target '{implementation}' is not registered"),
                        )
                    })?;
                self.resolve(target)
            }
            Activation::Decorator {
                implementation,
                inner,
            } => {
                let inner = self.resolve(inner)?;
                self.activate(implementation, service, vec![inner])
            }
            Activation::Composite {
                implementation,
                inner,
            } => {
                let inner = inner
                    .iter()
                    .map(|d| self.resolve(d))
                    .collect::<Result<Vec<_>>>()?;
                self.activate(implementation, service, inner)
            }
        }
    }

    fn activate(
        &self,
        implementation: &TypeRef,
        service: &TypeRef,
        inner: Vec<Instance>,
    ) -> Result<Instance> {
        let activator = self.state.activators.get(implementation).ok_or_else(|| {
            Error::activation(
                service.to_string(),
                format!("no activator registered for '{implementation}'"),
            )
        })?;
        let context = ActivationContext::new(implementation, service, self, inner);
        activator(&context)
    }
}
