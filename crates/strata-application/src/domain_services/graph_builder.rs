//! Registration graph builder
//!
//! Turns records into a normalized, deterministic [`RegistrationGraph`]:
//! condition evaluation, service type resolution, open-generic expansion,
//! base/layer partitioning and per-service grouping. Building never fails;
//! wiring mistakes only surface when the graph is applied.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use strata_domain::value_objects::{
    DiagnosticKind, EntriesByService, GraphDiagnostic, RegistrationEntry, RegistrationGraph,
    RegistrationRecord,
};
use tracing::info;

use crate::domain_services::conditions::{ActiveConditions, condition_label, is_matched};
use crate::domain_services::materializer::OpenGenericMaterializer;
use crate::domain_services::service_types::ServiceTypeResolver;
use crate::domain_services::type_system::TypeSystem;

/// Builds registration graphs
pub struct RegistrationGraphBuilder<'a, 'c> {
    types: &'a TypeSystem<'c>,
    scan_type_universe: bool,
}

impl<'a, 'c> RegistrationGraphBuilder<'a, 'c> {
    /// Create over `types`
    pub fn new(types: &'a TypeSystem<'c>) -> Self {
        Self {
            types,
            scan_type_universe: true,
        }
    }

    /// Enable or disable catalog scanning during open-generic expansion
    pub fn with_type_universe_scan(mut self, enabled: bool) -> Self {
        self.scan_type_universe = enabled;
        self
    }

    /// Build the graph for `records` under `active`
    pub fn build(&self, records: &[RegistrationRecord], active: &ActiveConditions) -> RegistrationGraph {
        let records: Vec<Arc<RegistrationRecord>> = records.iter().cloned().map(Arc::new).collect();
        self.build_shared(&records, active)
    }

    /// Build the graph for already shared records
    pub fn build_shared(
        &self,
        records: &[Arc<RegistrationRecord>],
        active: &ActiveConditions,
    ) -> RegistrationGraph {
        let resolver = ServiceTypeResolver::new(self.types);

        let all_entries = entries_for(&resolver, records, active);
        let applicable_entries: Vec<RegistrationEntry> = all_entries
            .iter()
            .filter(|e| e.condition_matched)
            .cloned()
            .collect();

        let materialization = OpenGenericMaterializer::new(self.types, self.scan_type_universe)
            .materialize(&applicable_entries);
        let materialized_entries: Vec<RegistrationEntry> =
            entries_for(&resolver, &materialization.records, active)
                .into_iter()
                .filter(|e| e.condition_matched)
                .collect();

        let (base_registrations, mut layered_registrations): (Vec<_>, Vec<_>) = materialized_entries
            .iter()
            .cloned()
            .partition(|e| e.record.is_base());
        layered_registrations.sort_by(|a, b| {
            a.record
                .order
                .cmp(&b.record.order)
                .then(a.record.is_composite.cmp(&b.record.is_composite))
        });

        let mut layers_by_service = group_by_service(&layered_registrations, |_| true);
        for layers in layers_by_service.values_mut() {
            layers.sort_by(compare_layers);
        }
        let implementations_by_service =
            group_by_service(&materialized_entries, |e| !e.record.is_decorator);
        let base_implementations_by_service = group_by_service(&materialized_entries, |e| {
            !e.record.is_decorator && !e.record.is_composite
        });

        let mut diagnostics = materialization.diagnostics;
        diagnostics.extend(empty_service_type_diagnostics(&materialized_entries));
        diagnostics.extend(missing_required_type_diagnostics(
            self.types,
            &materialized_entries,
            &implementations_by_service,
        ));

        info!(
            records = records.len(),
            applicable = applicable_entries.len(),
            materialized = materialized_entries.len(),
            base = base_registrations.len(),
            layered = layered_registrations.len(),
            diagnostics = diagnostics.len(),
            "Built registration graph"
        );

        RegistrationGraph {
            all_entries,
            applicable_entries,
            materialized_entries,
            base_registrations,
            layered_registrations,
            layers_by_service,
            implementations_by_service,
            base_implementations_by_service,
            diagnostics,
        }
    }
}

/// Evaluate conditions and service types for every record
pub fn entries_for(
    resolver: &ServiceTypeResolver<'_, '_>,
    records: &[Arc<RegistrationRecord>],
    active: &ActiveConditions,
) -> Vec<RegistrationEntry> {
    records
        .iter()
        .map(|record| RegistrationEntry {
            effective_service_types: resolver.resolve(record),
            condition_matched: is_matched(record, active),
            condition_label: condition_label(record),
            record: Arc::clone(record),
        })
        .collect()
}

/// Total order of a service's layer list: order, then decorators before
/// composites, then implementation name
pub fn compare_layers(a: &RegistrationEntry, b: &RegistrationEntry) -> Ordering {
    a.record
        .order
        .cmp(&b.record.order)
        .then(a.record.is_composite.cmp(&b.record.is_composite))
        .then_with(|| a.record.implementation_name().cmp(&b.record.implementation_name()))
}

fn group_by_service(
    entries: &[RegistrationEntry],
    include: impl Fn(&RegistrationEntry) -> bool,
) -> EntriesByService {
    let mut grouped = EntriesByService::new();
    for entry in entries.iter().filter(|e| include(*e)) {
        for service in &entry.effective_service_types {
            grouped
                .entry(service.clone())
                .or_default()
                .push(entry.clone());
        }
    }
    grouped
}

fn empty_service_type_diagnostics(entries: &[RegistrationEntry]) -> Vec<GraphDiagnostic> {
    entries
        .iter()
        .filter(|e| e.effective_service_types.is_empty())
        .map(|e| {
            GraphDiagnostic::new(
                DiagnosticKind::NoServiceTypes,
                e.implementation_type().clone(),
                "record resolved to no service types and is not registered",
            )
        })
        .collect()
}

fn missing_required_type_diagnostics(
    types: &TypeSystem<'_>,
    entries: &[RegistrationEntry],
    implementations: &EntriesByService,
) -> Vec<GraphDiagnostic> {
    let mut reported = HashSet::new();
    let mut diagnostics = Vec::new();
    for entry in entries {
        for required in &entry.record.required_types {
            if types.is_builtin(required)
                || required.contains_parameters()
                || implementations.contains_key(required)
            {
                continue;
            }
            if reported.insert((entry.implementation_type().clone(), required.clone())) {
                diagnostics.push(GraphDiagnostic::new(
                    DiagnosticKind::MissingRequiredType,
                    entry.implementation_type().clone(),
                    format!("no registration found for required type '{required}'"),
                ));
            }
        }
    }
    diagnostics
}
