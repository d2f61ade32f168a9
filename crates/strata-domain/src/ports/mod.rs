//! Domain ports
//!
//! Contracts the engine expects from its collaborators.

pub mod container;
pub mod type_catalog;

pub use container::{BaseRegistrationRequest, ContainerAdapter, LayerDescriptor, RegistrationKind};
pub use type_catalog::{GenericConstraints, GenericParameter, TypeCatalog, TypeDescriptor, TypeKind};
