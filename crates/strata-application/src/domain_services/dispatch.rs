//! Composite dispatch planning
//!
//! A dispatch composite implements a generic service closed over an
//! interface (`IHandler<IProduct>`) and routes each call to the
//! implementations registered for the argument's concrete type
//! (`IHandler<Battery>`, `IHandler<Screen>`, ...). Planning decides, once
//! and without touching any container, which concrete cases exist and which
//! implementations each case holds.

use std::collections::BTreeSet;
use std::sync::Arc;

use strata_domain::value_objects::{
    AggregationMode, RegistrationEntry, RegistrationGraph, RegistrationRecord, TypeRef,
};
use tracing::debug;

use crate::domain_services::type_system::TypeSystem;

/// One concrete argument type handled by a dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchCase {
    /// Concrete argument type matched at call time
    pub argument: TypeRef,
    /// Closed service type resolved for this case
    pub service: TypeRef,
    /// Implementations registered for `service`, in registration order
    pub implementations: Vec<TypeRef>,
}

/// Dispatch table layout for one dispatch composite
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchPlan {
    /// The dispatch composite record
    pub dispatcher: Arc<RegistrationRecord>,
    /// Service the dispatcher is registered as
    pub service: TypeRef,
    /// Interface the generic parameter is constrained to
    pub constraint: TypeRef,
    /// How several matched implementations combine
    pub mode: AggregationMode,
    /// Hold every matched implementation, or only the last registered one
    pub multiple: bool,
    /// Concrete cases, ordered by argument type
    pub cases: Vec<DispatchCase>,
}

impl DispatchPlan {
    /// Case for `argument`, if any
    pub fn case_for(&self, argument: &TypeRef) -> Option<&DispatchCase> {
        self.cases.iter().find(|c| &c.argument == argument)
    }
}

/// Computes dispatch plans from a built graph
pub struct DispatchPlanner<'a, 'c> {
    types: &'a TypeSystem<'c>,
}

impl<'a, 'c> DispatchPlanner<'a, 'c> {
    /// Create over `types`
    pub fn new(types: &'a TypeSystem<'c>) -> Self {
        Self { types }
    }

    /// Plans for every materialized dispatch composite in `graph`
    pub fn plan(&self, graph: &RegistrationGraph) -> Vec<DispatchPlan> {
        graph
            .base_registrations
            .iter()
            .filter(|e| e.record.is_dispatcher)
            .flat_map(|entry| self.plan_entry(graph, entry))
            .collect()
    }

    fn plan_entry(&self, graph: &RegistrationGraph, entry: &RegistrationEntry) -> Vec<DispatchPlan> {
        entry
            .effective_service_types
            .iter()
            .filter(|service| **service != entry.record.implementation_type)
            .filter_map(|service| self.plan_service(graph, entry, service))
            .collect()
    }

    fn plan_service(
        &self,
        graph: &RegistrationGraph,
        entry: &RegistrationEntry,
        service: &TypeRef,
    ) -> Option<DispatchPlan> {
        let definition = service.definition()?;
        let constraint = self.types.single_interface_constraint(definition)?;
        if service.arguments() != std::slice::from_ref(&constraint) {
            return None;
        }
        let parameter = self.types.parameter(definition, 0)?;

        let mut arguments = BTreeSet::new();
        let reachable = graph
            .materialized_entries
            .iter()
            .flat_map(|e| e.record.required_types.iter())
            .chain(graph.base_implementations_by_service.keys());
        for ty in reachable {
            collect_arguments(ty, service, &mut arguments);
        }

        let cases: Vec<DispatchCase> = arguments
            .into_iter()
            .filter(|argument| argument != &constraint)
            .filter(|argument| self.types.describe(argument).is_some_and(|d| d.is_concrete()))
            .filter(|argument| {
                self.types
                    .satisfies(&parameter, argument, std::slice::from_ref(argument))
                    .is_ok()
            })
            .map(|argument| {
                let closed = TypeRef::Named {
                    definition: definition.clone(),
                    arguments: vec![argument.clone()],
                };
                let implementations = graph
                    .base_implementations_for(&closed)
                    .iter()
                    .map(|e| e.record.implementation_type.clone())
                    .collect();
                DispatchCase {
                    argument,
                    service: closed,
                    implementations,
                }
            })
            .collect();

        debug!(
            dispatcher = %entry.record.implementation_type,
            service = %service,
            cases = cases.len(),
            "Planned dispatch composite"
        );

        Some(DispatchPlan {
            dispatcher: Arc::clone(&entry.record),
            service: service.clone(),
            constraint,
            mode: entry.record.dispatch_mode,
            multiple: entry.record.dispatch_multiple,
            cases,
        })
    }
}

/// Collect the arguments of every closed type sharing `service`'s definition,
/// looking through nested generic arguments
fn collect_arguments(ty: &TypeRef, service: &TypeRef, into: &mut BTreeSet<TypeRef>) {
    if ty.same_definition(service) && !ty.contains_parameters() {
        if let [argument] = ty.arguments() {
            into.insert(argument.clone());
        }
    }
    for argument in ty.arguments() {
        collect_arguments(argument, service, into);
    }
}
