//! Registration entries

use crate::value_objects::registration::RegistrationRecord;
use crate::value_objects::types::TypeRef;
use std::sync::Arc;

/// A record evaluated for one composition pass
///
/// Entries are derived data: they are rebuilt from the records on every
/// build and never outlive the graph that owns them.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationEntry {
    /// Source record
    pub record: Arc<RegistrationRecord>,
    /// Service types the record is exposed as
    pub effective_service_types: Vec<TypeRef>,
    /// Whether the record is active under the current conditions
    pub condition_matched: bool,
    /// Human-readable rendering of the record's conditions
    pub condition_label: String,
}

impl RegistrationEntry {
    /// Implementation type of the underlying record
    pub fn implementation_type(&self) -> &TypeRef {
        &self.record.implementation_type
    }

    /// Whether the entry exposes `service`
    pub fn serves(&self, service: &TypeRef) -> bool {
        self.effective_service_types.contains(service)
    }
}
