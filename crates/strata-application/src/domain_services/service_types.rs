//! Effective service type resolution

use std::collections::HashSet;

use strata_domain::value_objects::{AliasFallbackPolicy, RegistrationRecord, TypeRef};

use crate::domain_services::type_system::TypeSystem;

/// Computes the service types a record is exposed as
///
/// Explicit aliases win verbatim. Otherwise the record's fallback policy
/// decides, and built-in interfaces never leak into the result.
///
/// Decorators and aggregating composites never fall back to their own type:
/// a layer over its own type has no base to wrap. A `SelfOnly` layer
/// without aliases therefore resolves to nothing and is not registered; the
/// graph reports it as a `NoServiceTypes` diagnostic. An empty result means
/// "do not register"; it is not an error.
pub struct ServiceTypeResolver<'a, 'c> {
    types: &'a TypeSystem<'c>,
}

impl<'a, 'c> ServiceTypeResolver<'a, 'c> {
    /// Create over `types`
    pub fn new(types: &'a TypeSystem<'c>) -> Self {
        Self { types }
    }

    /// Effective service types of `record`, deduplicated in first-seen order
    pub fn resolve(&self, record: &RegistrationRecord) -> Vec<TypeRef> {
        if !record.service_type_aliases.is_empty() {
            return dedup(record.service_type_aliases.iter().cloned());
        }
        let implementation = &record.implementation_type;
        // A layer only ever wraps other registrations; it never serves itself.
        let include_self = !record.is_layer();
        match record.alias_fallback_policy {
            AliasFallbackPolicy::SelfOnly if include_self => vec![implementation.clone()],
            AliasFallbackPolicy::SelfOnly => Vec::new(),
            AliasFallbackPolicy::InterfacesOnly => dedup(self.interfaces(implementation)),
            AliasFallbackPolicy::SelfWithInterfaces => dedup(
                include_self
                    .then(|| implementation.clone())
                    .into_iter()
                    .chain(self.interfaces(implementation)),
            ),
        }
    }

    fn interfaces(&self, implementation: &TypeRef) -> Vec<TypeRef> {
        self.types
            .interfaces_of(implementation)
            .into_iter()
            .filter(|i| !self.types.is_builtin(i))
            .map(|i| i.to_generic_definition())
            .collect()
    }
}

fn dedup(types: impl IntoIterator<Item = TypeRef>) -> Vec<TypeRef> {
    let mut seen = HashSet::new();
    types.into_iter().filter(|t| seen.insert(t.clone())).collect()
}
