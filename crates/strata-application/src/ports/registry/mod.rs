//! Compile-time registries
//!
//! Type descriptions submitted through `linkme` distributed slices, so a
//! type catalog can be assembled without runtime introspection.

pub mod types;

pub use types::{KNOWN_TYPES, KnownTypeEntry, LinkedTypeCatalog, list_known_types};
