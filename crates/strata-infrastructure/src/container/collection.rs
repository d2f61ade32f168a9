//! Service collection
//!
//! The in-memory [`ContainerAdapter`]: an ordered descriptor list the
//! layering engine registers into and folds layers onto.

use std::sync::Arc;

use strata_domain::error::{Error, Result};
use strata_domain::ports::{BaseRegistrationRequest, ContainerAdapter, RegistrationKind};
use strata_domain::value_objects::{
    DuplicatePolicy, Lifetime, RegistrationRecord, ServiceKey, TypeRef,
};
use tracing::debug;

use super::activator::ActivatorRegistry;
use super::descriptor::{Activation, DescriptorId, ServiceDescriptor};
use super::provider::ServiceProvider;
use crate::constants::IN_MEMORY_ADAPTER_NAME;

/// Ordered descriptor list
#[derive(Debug, Clone)]
pub struct ServiceCollection {
    descriptors: Vec<ServiceDescriptor>,
    next_id: u64,
    keyed_layers: bool,
}

impl Default for ServiceCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceCollection {
    /// Create an empty collection with keyed layer support
    pub fn new() -> Self {
        Self {
            descriptors: Vec::new(),
            next_id: 0,
            keyed_layers: true,
        }
    }

    /// Refuse keyed decorators and composites
    pub fn without_keyed_layers(mut self) -> Self {
        self.keyed_layers = false;
        self
    }

    /// Every descriptor, in registration order
    pub fn descriptors(&self) -> &[ServiceDescriptor] {
        &self.descriptors
    }

    /// Number of descriptors
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether the collection holds no descriptor
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Whether `service` has a descriptor under `key`
    pub fn contains(&self, service: &TypeRef, key: Option<&ServiceKey>) -> bool {
        self.descriptors.iter().any(|d| d.matches(service, key))
    }

    /// Freeze into a provider resolving through `activators`
    pub fn build_provider(self, activators: ActivatorRegistry) -> ServiceProvider {
        ServiceProvider::new(self.descriptors, activators)
    }

    fn next_id(&mut self) -> DescriptorId {
        self.next_id += 1;
        DescriptorId(self.next_id)
    }

    fn descriptor(
        &mut self,
        service: &TypeRef,
        key: Option<ServiceKey>,
        lifetime: Lifetime,
        activation: Activation,
    ) -> ServiceDescriptor {
        ServiceDescriptor {
            id: self.next_id(),
            service_type: service.clone(),
            key,
            lifetime,
            activation,
        }
    }
}

impl ContainerAdapter for ServiceCollection {
    type Descriptor = ServiceDescriptor;

    fn name(&self) -> &str {
        IN_MEMORY_ADAPTER_NAME
    }

    fn try_add_base_registration(&mut self, request: &BaseRegistrationRequest) -> Result<bool> {
        let service = &request.service_type;
        let key = request.key.as_ref();
        let exists = self.contains(service, key);

        match request.duplicate_policy {
            DuplicatePolicy::Throw if exists => {
                return Err(Error::DuplicateRegistration {
                    service: service.to_string(),
                    key: key.map(|k| format!(" [key {k}]")).unwrap_or_default(),
                    implementation: request.implementation_type.to_string(),
                });
            }
            DuplicatePolicy::Skip if exists => return Ok(false),
            DuplicatePolicy::Replace if exists => {
                self.descriptors.retain(|d| !d.matches(service, key));
                debug!(service = %service, "Replaced existing registrations");
            }
            _ => {}
        }

        let implementation = request.implementation_type.clone();
        let activation = match request.kind {
            RegistrationKind::Direct => Activation::Type { implementation },
            RegistrationKind::Forward => Activation::Forward { implementation },
        };
        let descriptor = self.descriptor(service, request.key.clone(), request.lifetime, activation);
        self.descriptors.push(descriptor);
        Ok(true)
    }

    fn supports_keyed_layers(&self) -> bool {
        self.keyed_layers
    }

    fn descriptors_for_service(&self, service: &TypeRef) -> Vec<ServiceDescriptor> {
        self.descriptors
            .iter()
            .filter(|d| &d.service_type == service)
            .cloned()
            .collect()
    }

    fn replace_descriptors_for_service(
        &mut self,
        service: &TypeRef,
        descriptors: Vec<ServiceDescriptor>,
    ) {
        let position = self
            .descriptors
            .iter()
            .position(|d| &d.service_type == service)
            .unwrap_or(self.descriptors.len());
        self.descriptors.retain(|d| &d.service_type != service);
        let position = position.min(self.descriptors.len());
        self.descriptors.splice(position..position, descriptors);
    }

    fn describe_decorator(
        &mut self,
        service: &TypeRef,
        previous: &ServiceDescriptor,
        decorator: &RegistrationRecord,
    ) -> Result<ServiceDescriptor> {
        let activation = Activation::Decorator {
            implementation: decorator.implementation_type.clone(),
            inner: Arc::new(previous.clone()),
        };
        Ok(self.descriptor(service, previous.key.clone(), previous.lifetime, activation))
    }

    fn describe_composite(
        &mut self,
        service: &TypeRef,
        composite: &RegistrationRecord,
        inner: &[ServiceDescriptor],
        lifetime: Lifetime,
    ) -> Result<ServiceDescriptor> {
        let activation = Activation::Composite {
            implementation: composite.implementation_type.clone(),
            inner: inner.iter().cloned().map(Arc::new).collect(),
        };
        Ok(self.descriptor(service, composite.key.clone(), lifetime, activation))
    }
}
