//! Registration graph
//!
//! The normalized output of a build. Adapters consume it once while applying
//! registrations; diagnostic consumers may inspect it read-only afterwards.

use crate::value_objects::entry::RegistrationEntry;
use crate::value_objects::types::TypeRef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Entries grouped by service type
pub type EntriesByService = BTreeMap<TypeRef, Vec<RegistrationEntry>>;

/// Kind of a non-fatal finding produced while building the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Open-generic record that produced no closed registration
    UnresolvedOpenGeneric,
    /// Open-generic service type with a parameter count other than one
    UnsupportedArity,
    /// Record that resolved to zero service types
    NoServiceTypes,
    /// Required type with no implementation in the graph
    MissingRequiredType,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UnresolvedOpenGeneric => "unresolved-open-generic",
            Self::UnsupportedArity => "unsupported-arity",
            Self::NoServiceTypes => "no-service-types",
            Self::MissingRequiredType => "missing-required-type",
        };
        f.write_str(name)
    }
}

/// A non-fatal finding attached to the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDiagnostic {
    /// Finding kind
    pub kind: DiagnosticKind,
    /// Implementation the finding is about
    pub implementation: TypeRef,
    /// Description
    pub message: String,
}

impl GraphDiagnostic {
    /// Create a diagnostic
    pub fn new(kind: DiagnosticKind, implementation: TypeRef, message: impl Into<String>) -> Self {
        Self {
            kind,
            implementation,
            message: message.into(),
        }
    }
}

impl fmt::Display for GraphDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.implementation, self.message)
    }
}

/// Result of one build
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationGraph {
    /// Every input record, condition-evaluated
    pub all_entries: Vec<RegistrationEntry>,
    /// Condition-matched subset of `all_entries`
    pub applicable_entries: Vec<RegistrationEntry>,
    /// Entries after open-generic expansion, condition-matched
    pub materialized_entries: Vec<RegistrationEntry>,
    /// Entries registered directly against their service types
    pub base_registrations: Vec<RegistrationEntry>,
    /// Decorators and aggregating composites, by `(order, composite-after-decorator)`
    pub layered_registrations: Vec<RegistrationEntry>,
    /// Layer list per service type, totally ordered
    pub layers_by_service: EntriesByService,
    /// Non-decorator entries per service type
    pub implementations_by_service: EntriesByService,
    /// Non-decorator, non-composite entries per service type
    pub base_implementations_by_service: EntriesByService,
    /// Non-fatal findings
    pub diagnostics: Vec<GraphDiagnostic>,
}

impl RegistrationGraph {
    /// Layers declared for `service`, in fold order
    pub fn layers_for(&self, service: &TypeRef) -> &[RegistrationEntry] {
        self.layers_by_service
            .get(service)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Non-decorator implementations of `service`
    pub fn implementations_for(&self, service: &TypeRef) -> &[RegistrationEntry] {
        self.implementations_by_service
            .get(service)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Plain implementations of `service`
    pub fn base_implementations_for(&self, service: &TypeRef) -> &[RegistrationEntry] {
        self.base_implementations_by_service
            .get(service)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Entries flagged for export to diagrams
    pub fn entries_for_export(&self) -> impl Iterator<Item = &RegistrationEntry> {
        self.materialized_entries
            .iter()
            .filter(|e| e.record.export_for_visualization)
    }

    /// Entries shared with other modules
    pub fn public_entries(&self) -> impl Iterator<Item = &RegistrationEntry> {
        self.materialized_entries
            .iter()
            .filter(|e| e.record.use_public)
    }

    /// Diagnostics of the given kind
    pub fn diagnostics_of(&self, kind: DiagnosticKind) -> impl Iterator<Item = &GraphDiagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }
}
