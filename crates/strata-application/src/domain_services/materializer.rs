//! Open-generic materialization
//!
//! Expands records whose implementation is an open generic definition into
//! closed records. Candidate arguments come from three places:
//!
//! 1. closed registrations already present for the alias definition,
//! 2. closed generic types reachable through any record's required types,
//! 3. catalog types satisfying the alias parameter's explicit type constraints.
//!
//! Aggregating composites draw from (1) and (3) and keep every candidate.
//! Plain fallbacks draw from (2) and (3), accept only concrete types, and
//! yield to explicit closed registrations. Dispatch composites are closed
//! over the single interface their parameter is constrained to.

use std::collections::BTreeSet;
use std::sync::Arc;

use strata_domain::value_objects::{
    DiagnosticKind, GraphDiagnostic, RegistrationEntry, RegistrationRecord, TypeRef,
};
use tracing::{debug, warn};

use crate::domain_services::type_system::TypeSystem;

/// Output of one materialization pass
#[derive(Debug, Clone, Default)]
pub struct Materialization {
    /// Records in input order, open generics replaced by their expansions
    pub records: Vec<Arc<RegistrationRecord>>,
    /// Findings about records that could not be expanded
    pub diagnostics: Vec<GraphDiagnostic>,
}

/// Expands open-generic registrations into closed ones
pub struct OpenGenericMaterializer<'a, 'c> {
    types: &'a TypeSystem<'c>,
    scan_type_universe: bool,
}

/// Closed types known before expansion
struct KnownClosedTypes {
    registrations: BTreeSet<TypeRef>,
    required: BTreeSet<TypeRef>,
}

impl<'a, 'c> OpenGenericMaterializer<'a, 'c> {
    /// Create over `types`; `scan_type_universe` enables catalog scanning
    pub fn new(types: &'a TypeSystem<'c>, scan_type_universe: bool) -> Self {
        Self {
            types,
            scan_type_universe,
        }
    }

    /// Expand every open-generic entry; other entries pass through
    pub fn materialize(&self, entries: &[RegistrationEntry]) -> Materialization {
        let known = KnownClosedTypes::collect(entries);
        let mut output = Materialization::default();

        for entry in entries {
            if !entry.implementation_type().contains_parameters() {
                output.records.push(Arc::clone(&entry.record));
                continue;
            }
            match self.expand(entry, &known) {
                Ok(expanded) if !expanded.is_empty() => {
                    debug!(
                        implementation = %entry.implementation_type(),
                        count = expanded.len(),
                        "Materialized open generic registration"
                    );
                    output.records.extend(expanded.into_iter().map(Arc::new));
                }
                Ok(_) => {
                    warn!(
                        implementation = %entry.implementation_type(),
                        "Open generic registration produced no closed candidates"
                    );
                    output.diagnostics.push(GraphDiagnostic::new(
                        DiagnosticKind::UnresolvedOpenGeneric,
                        entry.implementation_type().clone(),
                        "no candidate type satisfies the generic constraints",
                    ));
                    output.records.push(Arc::clone(&entry.record));
                }
                Err(diagnostic) => {
                    warn!(
                        implementation = %entry.implementation_type(),
                        kind = %diagnostic.kind,
                        "{}", diagnostic.message
                    );
                    output.diagnostics.push(diagnostic);
                    output.records.push(Arc::clone(&entry.record));
                }
            }
        }
        output
    }

    fn expand(
        &self,
        entry: &RegistrationEntry,
        known: &KnownClosedTypes,
    ) -> Result<Vec<RegistrationRecord>, GraphDiagnostic> {
        let record = &entry.record;
        let implementation = &record.implementation_type;
        let unresolved = |message: String| {
            GraphDiagnostic::new(
                DiagnosticKind::UnresolvedOpenGeneric,
                implementation.clone(),
                message,
            )
        };

        if !implementation.is_generic_definition() {
            return Err(unresolved(format!(
                "'{implementation}' is partially closed; only generic definitions are expanded"
            )));
        }
        let includes_self = entry.effective_service_types.contains(implementation);
        let open_aliases: Vec<&TypeRef> = entry
            .effective_service_types
            .iter()
            .filter(|t| *t != implementation && t.contains_parameters())
            .collect();
        let alias = match open_aliases.as_slice() {
            [only] => (*only).clone(),
            [] => {
                return Err(unresolved(
                    "open generic registration exposes no open generic service type".to_string(),
                ));
            }
            _ => {
                return Err(unresolved(format!(
                    "open generic registration exposes {} open generic service types; exactly one is supported",
                    open_aliases.len()
                )));
            }
        };
        let arity = alias.definition().map_or(0, |d| d.arity);
        let implementation_arity = implementation.definition().map_or(0, |d| d.arity);
        if arity != 1 || implementation_arity != 1 {
            return Err(GraphDiagnostic::new(
                DiagnosticKind::UnsupportedArity,
                implementation.clone(),
                format!(
                    "service '{alias}' has {arity} generic parameter(s) and implementation has {implementation_arity}; only single-parameter generics are materialized"
                ),
            ));
        }
        if !alias.is_generic_definition() {
            return Err(unresolved(format!(
                "service '{alias}' is partially closed; only generic definitions are expanded"
            )));
        }

        let candidates = if record.is_dispatcher {
            self.dispatch_candidates(&alias)
        } else if record.is_composite {
            self.composite_candidates(&alias, known)
        } else {
            self.fallback_candidates(&alias, known)
        };

        let mut expanded = Vec::new();
        for argument in candidates {
            let arguments = std::slice::from_ref(&argument);
            let closed_implementation = match self.types.close(implementation, arguments) {
                Ok(closed) => closed,
                Err(violation) => {
                    debug!(implementation = %implementation, argument = %argument, %violation, "Skipping candidate");
                    continue;
                }
            };
            let closed_alias = match self.types.close(&alias, arguments) {
                Ok(closed) => closed,
                Err(violation) => {
                    debug!(service = %alias, argument = %argument, %violation, "Skipping candidate");
                    continue;
                }
            };
            if !record.is_composite && known.registrations.contains(&closed_alias) {
                debug!(
                    service = %closed_alias,
                    "Explicit closed registration takes precedence over generic fallback"
                );
                continue;
            }
            let mut aliases = Vec::with_capacity(2);
            if includes_self {
                aliases.push(closed_implementation.clone());
            }
            aliases.push(closed_alias);
            expanded.push(record.closed_over(closed_implementation, aliases));
        }
        Ok(expanded)
    }

    fn composite_candidates(&self, alias: &TypeRef, known: &KnownClosedTypes) -> Vec<TypeRef> {
        let mut candidates = arguments_matching(alias, &known.registrations);
        for candidate in self.universe_candidates(alias, true) {
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
        candidates
    }

    fn fallback_candidates(&self, alias: &TypeRef, known: &KnownClosedTypes) -> Vec<TypeRef> {
        let mut candidates = arguments_matching(alias, &known.required);
        for candidate in self.universe_candidates(alias, false) {
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
        candidates
    }

    fn dispatch_candidates(&self, alias: &TypeRef) -> Vec<TypeRef> {
        alias
            .definition()
            .and_then(|d| self.types.single_interface_constraint(d))
            .into_iter()
            .collect()
    }

    /// Catalog types satisfying the alias parameter's constraints
    ///
    /// Only constrained parameters trigger a scan: an explicit type other
    /// than `Object`, or a reference, value or default-constructor
    /// constraint. A parameter with none of these never expands from the
    /// catalog.
    fn universe_candidates(&self, alias: &TypeRef, allow_abstract: bool) -> Vec<TypeRef> {
        if !self.scan_type_universe {
            return Vec::new();
        }
        let Some(parameter) = alias.definition().and_then(|d| self.types.parameter(d, 0)) else {
            return Vec::new();
        };
        let constraints = &parameter.constraints;
        let special = constraints.reference_type
            || constraints.value_type
            || constraints.default_constructor;
        if !special && self.types.explicit_type_constraints(&parameter).is_empty() {
            return Vec::new();
        }
        self.types
            .catalog()
            .all_known_types()
            .into_iter()
            .filter(|d| d.name.arity == 0)
            .filter(|d| allow_abstract || d.is_concrete())
            .map(|d| d.reference())
            .filter(|candidate| {
                self.types
                    .satisfies(&parameter, candidate, std::slice::from_ref(candidate))
                    .is_ok()
            })
            .collect()
    }
}

impl KnownClosedTypes {
    fn collect(entries: &[RegistrationEntry]) -> Self {
        let mut registrations = BTreeSet::new();
        let mut required = BTreeSet::new();
        for entry in entries {
            let record = &entry.record;
            for ty in &record.required_types {
                collect_closed_generics(ty, &mut required);
            }
            if record.is_layer() || record.implementation_type.contains_parameters() {
                continue;
            }
            if record.implementation_type.is_generic() {
                registrations.insert(record.implementation_type.clone());
            }
            registrations.extend(
                entry
                    .effective_service_types
                    .iter()
                    .filter(|t| t.is_generic() && !t.contains_parameters())
                    .cloned(),
            );
        }
        Self {
            registrations,
            required,
        }
    }
}

fn collect_closed_generics(ty: &TypeRef, into: &mut BTreeSet<TypeRef>) {
    if ty.is_generic() && !ty.contains_parameters() {
        into.insert(ty.clone());
    }
    for argument in ty.arguments() {
        collect_closed_generics(argument, into);
    }
}

/// First generic arguments of the closed types sharing `alias`'s definition
fn arguments_matching(alias: &TypeRef, closed: &BTreeSet<TypeRef>) -> Vec<TypeRef> {
    let mut arguments = Vec::new();
    for ty in closed.iter().filter(|t| t.same_definition(alias)) {
        if let [argument] = ty.arguments() {
            if !arguments.contains(argument) {
                arguments.push(argument.clone());
            }
        }
    }
    arguments
}
