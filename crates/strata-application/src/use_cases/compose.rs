//! Composition use case
//!
//! Validates records, builds the registration graph, applies it to an
//! adapter and plans dispatch composites. This is the single entry point
//! hosts are expected to call.

use strata_domain::constants::DEFAULT_BUILTIN_NAMESPACE;
use strata_domain::error::{Error, Result};
use strata_domain::ports::{ContainerAdapter, TypeCatalog};
use strata_domain::value_objects::{DiagnosticKind, RegistrationGraph, RegistrationRecord};
use tracing::info;

use crate::domain_services::conditions::ActiveConditions;
use crate::domain_services::dispatch::{DispatchPlan, DispatchPlanner};
use crate::domain_services::graph_builder::RegistrationGraphBuilder;
use crate::domain_services::layering::{ApplySummary, LayeringEngine};
use crate::domain_services::type_system::TypeSystem;

/// Everything one composition pass produced
#[derive(Debug, Clone)]
pub struct Composition {
    /// Normalized graph, read-only for diagnostic consumers
    pub graph: RegistrationGraph,
    /// Dispatch tables to build at call sites
    pub dispatch_plans: Vec<DispatchPlan>,
    /// Apply counters
    pub summary: ApplySummary,
}

/// Composition entry point
#[derive(Debug, Clone)]
pub struct CompositionService {
    builtin_namespace: String,
    scan_type_universe: bool,
    strict_arity: bool,
}

impl Default for CompositionService {
    fn default() -> Self {
        Self {
            builtin_namespace: DEFAULT_BUILTIN_NAMESPACE.to_string(),
            scan_type_universe: true,
            strict_arity: false,
        }
    }
}

impl CompositionService {
    /// Create with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the built-in namespace
    pub fn with_builtin_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.builtin_namespace = namespace.into();
        self
    }

    /// Enable or disable catalog scanning during open-generic expansion
    pub fn with_type_universe_scan(mut self, enabled: bool) -> Self {
        self.scan_type_universe = enabled;
        self
    }

    /// Fail the build when an open generic has an unsupported arity
    pub fn with_strict_arity(mut self, strict: bool) -> Self {
        self.strict_arity = strict;
        self
    }

    /// Validate `records` and build their graph
    ///
    /// Every implementation definition must be described by `catalog`.
    pub fn build_graph(
        &self,
        catalog: &dyn TypeCatalog,
        records: &[RegistrationRecord],
        active: &ActiveConditions,
    ) -> Result<RegistrationGraph> {
        let types = TypeSystem::new(catalog, self.builtin_namespace.clone());
        for record in records {
            record.validate()?;
            if types.describe(&record.implementation_type).is_none() {
                return Err(Error::invalid_argument(format!(
                    "implementation type '{}' is not described by the type catalog",
                    record.implementation_type
                )));
            }
        }
        let graph = RegistrationGraphBuilder::new(&types)
            .with_type_universe_scan(self.scan_type_universe)
            .build(records, active);

        if self.strict_arity {
            if let Some(diagnostic) = graph.diagnostics_of(DiagnosticKind::UnsupportedArity).next() {
                return Err(Error::configuration(diagnostic.to_string()));
            }
        }
        Ok(graph)
    }

    /// Apply a built graph to `adapter`
    pub fn apply<A: ContainerAdapter>(
        &self,
        graph: &RegistrationGraph,
        adapter: &mut A,
    ) -> Result<ApplySummary> {
        LayeringEngine::new().apply(graph, adapter)
    }

    /// Plan every dispatch composite in `graph`
    pub fn plan_dispatch(
        &self,
        catalog: &dyn TypeCatalog,
        graph: &RegistrationGraph,
    ) -> Vec<DispatchPlan> {
        let types = TypeSystem::new(catalog, self.builtin_namespace.clone());
        DispatchPlanner::new(&types).plan(graph)
    }

    /// Build, apply and plan in one pass
    pub fn compose<A: ContainerAdapter>(
        &self,
        catalog: &dyn TypeCatalog,
        records: &[RegistrationRecord],
        active: &ActiveConditions,
        adapter: &mut A,
    ) -> Result<Composition> {
        let graph = self.build_graph(catalog, records, active)?;
        let summary = self.apply(&graph, adapter)?;
        let dispatch_plans = self.plan_dispatch(catalog, &graph);
        info!(
            adapter = adapter.name(),
            services = graph.implementations_by_service.len(),
            dispatchers = dispatch_plans.len(),
            "Composition complete"
        );
        Ok(Composition {
            graph,
            dispatch_plans,
            summary,
        })
    }
}
