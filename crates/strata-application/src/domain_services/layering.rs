//! Layering engine
//!
//! Applies a [`RegistrationGraph`] to a [`ContainerAdapter`]: base
//! registrations first, then every service's layer list folded onto the
//! descriptors the adapter holds for it.
//!
//! Layers fold in list order, so the lowest `order` ends up innermost and the
//! highest wraps outward. At equal order a decorator folds before a
//! composite, so the composite aggregates already-decorated instances.

use strata_domain::error::{Error, Result};
use strata_domain::ports::{
    BaseRegistrationRequest, ContainerAdapter, LayerDescriptor, RegistrationKind,
};
use strata_domain::value_objects::{
    DuplicatePolicy, Lifetime, RegistrationEntry, RegistrationGraph, RegistrationRecord,
    ServiceKey, TypeRef,
};
use tracing::{debug, info};

/// Counters describing one apply pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplySummary {
    /// Base registration calls that added a descriptor
    pub registrations_added: usize,
    /// Base registration calls skipped by duplicate policy
    pub registrations_skipped: usize,
    /// Service types that had layers folded
    pub layered_services: usize,
    /// Decorator descriptors created
    pub decorators_applied: usize,
    /// Composite descriptors created
    pub composites_applied: usize,
}

/// Effective lifetime of a composite over `inner` lifetimes
///
/// Singleton if any inner is singleton, else scoped if any is scoped,
/// else transient.
pub fn infer_composite_lifetime(inner: impl IntoIterator<Item = Lifetime>) -> Lifetime {
    let mut inferred = Lifetime::Transient;
    for lifetime in inner {
        match lifetime {
            Lifetime::Singleton => return Lifetime::Singleton,
            Lifetime::Scoped => inferred = Lifetime::Scoped,
            Lifetime::Transient => {}
        }
    }
    inferred
}

/// Applies graphs to container adapters
#[derive(Debug, Clone, Copy, Default)]
pub struct LayeringEngine;

impl LayeringEngine {
    /// Create the engine
    pub fn new() -> Self {
        Self
    }

    /// Register every base entry, then fold every layer list
    pub fn apply<A: ContainerAdapter>(
        &self,
        graph: &RegistrationGraph,
        adapter: &mut A,
    ) -> Result<ApplySummary> {
        let mut summary = ApplySummary::default();

        for entry in &graph.base_registrations {
            self.register_base(entry, adapter, &mut summary)?;
        }

        for (service, layers) in &graph.layers_by_service {
            if layers.is_empty() {
                continue;
            }
            self.apply_layers(service, layers, adapter, &mut summary)?;
            summary.layered_services += 1;
        }

        info!(
            adapter = adapter.name(),
            added = summary.registrations_added,
            skipped = summary.registrations_skipped,
            layered_services = summary.layered_services,
            decorators = summary.decorators_applied,
            composites = summary.composites_applied,
            "Applied registration graph"
        );
        Ok(summary)
    }

    /// Register one base entry
    ///
    /// Unkeyed records register the implementation directly and forward
    /// every other service type to it, so all aliases share one instance
    /// path. Keyed records register directly under every service type.
    /// Under [`DuplicatePolicy::Throw`] every request is checked before any
    /// is added, so a collision leaves the adapter untouched.
    pub fn register_base<A: ContainerAdapter>(
        &self,
        entry: &RegistrationEntry,
        adapter: &mut A,
        summary: &mut ApplySummary,
    ) -> Result<()> {
        let record = &entry.record;
        if entry.effective_service_types.is_empty() {
            return Ok(());
        }
        let implementation = &record.implementation_type;

        let requests: Vec<BaseRegistrationRequest> = if record.key.is_some() {
            entry
                .effective_service_types
                .iter()
                .map(|service| request(record, service, RegistrationKind::Direct))
                .collect()
        } else {
            std::iter::once(request(record, implementation, RegistrationKind::Direct))
                .chain(
                    entry
                        .effective_service_types
                        .iter()
                        .filter(|service| *service != implementation)
                        .map(|service| request(record, service, RegistrationKind::Forward)),
                )
                .collect()
        };

        if record.duplicate_policy == DuplicatePolicy::Throw {
            ensure_no_duplicates(&requests, &*adapter)?;
        }

        for request in &requests {
            if adapter.try_add_base_registration(request)? {
                summary.registrations_added += 1;
                debug!(
                    service = %request.service_type,
                    implementation = %request.implementation_type,
                    kind = %request.kind,
                    lifetime = %request.lifetime,
                    "Registered base implementation"
                );
            } else {
                summary.registrations_skipped += 1;
                debug!(
                    service = %request.service_type,
                    implementation = %request.implementation_type,
                    "Skipped duplicate registration"
                );
            }
        }
        Ok(())
    }

    fn apply_layers<A: ContainerAdapter>(
        &self,
        service: &TypeRef,
        layers: &[RegistrationEntry],
        adapter: &mut A,
        summary: &mut ApplySummary,
    ) -> Result<()> {
        if !adapter.supports_keyed_layers() {
            if let Some(keyed) = layers.iter().find(|l| l.record.key.is_some()) {
                return Err(Error::keyed_layer_unsupported(
                    adapter.name(),
                    service.to_string(),
                    keyed.record.implementation_name(),
                ));
            }
        }

        let mut current = adapter.descriptors_for_service(service);
        for layer in layers {
            let record = &layer.record;
            if record.is_decorator {
                // A decorator must wrap at least one descriptor under its own key.
                if !current.iter().any(|d| same_key(d, record.key.as_ref())) {
                    return Err(Error::decorator_without_base(
                        service.to_string(),
                        record.implementation_name(),
                    ));
                }
                current = decorate(service, current, record, adapter, summary)?;
            } else {
                current = aggregate(service, current, record, adapter)?;
                summary.composites_applied += 1;
            }
        }

        adapter.replace_descriptors_for_service(service, current);
        Ok(())
    }
}

fn request(
    record: &RegistrationRecord,
    service: &TypeRef,
    kind: RegistrationKind,
) -> BaseRegistrationRequest {
    BaseRegistrationRequest {
        service_type: service.clone(),
        implementation_type: record.implementation_type.clone(),
        lifetime: record.lifetime,
        duplicate_policy: record.duplicate_policy,
        kind,
        key: record.key.clone(),
    }
}

/// Fail before touching the adapter when any request would collide
fn ensure_no_duplicates<A: ContainerAdapter>(
    requests: &[BaseRegistrationRequest],
    adapter: &A,
) -> Result<()> {
    for request in requests {
        let key = request.key.as_ref();
        let exists = adapter
            .descriptors_for_service(&request.service_type)
            .iter()
            .any(|d| same_key(d, key));
        if exists {
            return Err(Error::DuplicateRegistration {
                service: request.service_type.to_string(),
                key: key.map(|k| format!(" [key {k}]")).unwrap_or_default(),
                implementation: request.implementation_type.to_string(),
            });
        }
    }
    Ok(())
}

fn same_key<D: LayerDescriptor>(descriptor: &D, key: Option<&ServiceKey>) -> bool {
    descriptor.key() == key
}

/// Wrap every descriptor sharing the decorator's key
fn decorate<A: ContainerAdapter>(
    service: &TypeRef,
    current: Vec<A::Descriptor>,
    decorator: &RegistrationRecord,
    adapter: &mut A,
    summary: &mut ApplySummary,
) -> Result<Vec<A::Descriptor>> {
    let key = decorator.key.as_ref();
    let mut folded = Vec::with_capacity(current.len());
    for descriptor in current {
        if same_key(&descriptor, key) {
            folded.push(adapter.describe_decorator(service, &descriptor, decorator)?);
            summary.decorators_applied += 1;
            debug!(service = %service, decorator = %decorator.implementation_type, "Folded decorator");
        } else {
            folded.push(descriptor);
        }
    }
    Ok(folded)
}

/// Collapse every descriptor sharing the composite's key into one
fn aggregate<A: ContainerAdapter>(
    service: &TypeRef,
    current: Vec<A::Descriptor>,
    composite: &RegistrationRecord,
    adapter: &mut A,
) -> Result<Vec<A::Descriptor>> {
    let key = composite.key.as_ref();
    let position = current
        .iter()
        .position(|d| same_key(d, key))
        .unwrap_or(current.len());
    let (inner, mut rest): (Vec<_>, Vec<_>) = current.into_iter().partition(|d| same_key(d, key));
    let lifetime = infer_composite_lifetime(inner.iter().map(LayerDescriptor::lifetime));
    let descriptor = adapter.describe_composite(service, composite, &inner, lifetime)?;
    debug!(
        service = %service,
        composite = %composite.implementation_type,
        inner = inner.len(),
        lifetime = %lifetime,
        "Folded composite"
    );
    rest.insert(position.min(rest.len()), descriptor);
    Ok(rest)
}
