//! Value objects
//!
//! Immutable data flowing through the engine.

pub mod entry;
pub mod graph;
pub mod registration;
pub mod types;

pub use entry::RegistrationEntry;
pub use graph::{DiagnosticKind, EntriesByService, GraphDiagnostic, RegistrationGraph};
pub use registration::{
    AggregationMode, AliasFallbackPolicy, DuplicatePolicy, Lifetime, RegistrationRecord,
    RegistrationRecordBuilder, ServiceKey,
};
pub use types::{TypeName, TypeRef};
