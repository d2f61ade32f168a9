//! Type catalog port
//!
//! The universe of types the engine may consider when closing open generics.
//! Platforms without runtime introspection supply it from registration
//! manifests or build-time generated tables.

use crate::value_objects::types::{TypeName, TypeRef};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Broad category of a type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// Reference type with state and behaviour
    #[default]
    Class,
    /// Value type
    Struct,
    /// Contract without implementation
    Interface,
}

/// Constraints attached to one generic parameter
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenericConstraints {
    /// Argument must be a reference type
    #[serde(default)]
    pub reference_type: bool,
    /// Argument must be a non-nullable value type
    #[serde(default)]
    pub value_type: bool,
    /// Argument must have a public parameterless constructor
    #[serde(default)]
    pub default_constructor: bool,
    /// Base types and interfaces the argument must be assignable to.
    /// May reference the definition's own parameters.
    #[serde(default)]
    pub types: Vec<TypeRef>,
}

impl GenericConstraints {
    /// Whether no constraint of any kind is present
    pub fn is_empty(&self) -> bool {
        !self.reference_type && !self.value_type && !self.default_constructor && self.types.is_empty()
    }
}

/// Generic parameter of a type definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericParameter {
    /// Declared name, for messages
    pub name: String,
    /// Constraints on the argument
    #[serde(default)]
    pub constraints: GenericConstraints,
}

impl GenericParameter {
    /// Unconstrained parameter
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraints: GenericConstraints::default(),
        }
    }

    /// Add an assignability constraint
    pub fn with_type_constraint(mut self, constraint: TypeRef) -> Self {
        self.constraints.types.push(constraint);
        self
    }

    /// Require a reference type argument
    pub fn reference_type(mut self) -> Self {
        self.constraints.reference_type = true;
        self
    }

    /// Require a value type argument
    pub fn value_type(mut self) -> Self {
        self.constraints.value_type = true;
        self
    }

    /// Require a parameterless constructor
    pub fn default_constructor(mut self) -> Self {
        self.constraints.default_constructor = true;
        self
    }
}

/// Catalog description of one type definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Definition identity
    pub name: TypeName,
    /// Category
    #[serde(default)]
    pub kind: TypeKind,
    /// Cannot be instantiated directly
    #[serde(default)]
    pub is_abstract: bool,
    /// Has a public parameterless constructor
    #[serde(default)]
    pub has_default_constructor: bool,
    /// Generic parameters, in position order
    #[serde(default)]
    pub generic_parameters: Vec<GenericParameter>,
    /// Directly implemented interfaces (or extended, for interfaces)
    #[serde(default)]
    pub interfaces: Vec<TypeRef>,
    /// Base class, if any
    #[serde(default)]
    pub base: Option<TypeRef>,
}

impl TypeDescriptor {
    /// Describe a non-generic class
    pub fn class(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_kind(TypeName::new(namespace, name), TypeKind::Class)
    }

    /// Describe a non-generic interface
    pub fn interface(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_kind(TypeName::new(namespace, name), TypeKind::Interface)
    }

    /// Describe a non-generic value type
    pub fn value(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_kind(TypeName::new(namespace, name), TypeKind::Struct)
    }

    /// Describe a type of the given kind
    pub fn with_kind(name: TypeName, kind: TypeKind) -> Self {
        Self {
            name,
            kind,
            is_abstract: kind == TypeKind::Interface,
            has_default_constructor: false,
            generic_parameters: Vec::new(),
            interfaces: Vec::new(),
            base: None,
        }
    }

    /// Append a generic parameter, bumping the definition arity
    pub fn with_parameter(mut self, parameter: GenericParameter) -> Self {
        self.generic_parameters.push(parameter);
        self.name.arity = self.generic_parameters.len();
        self
    }

    /// Add an implemented interface
    pub fn implements(mut self, interface: TypeRef) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Set the base class
    pub fn extends(mut self, base: TypeRef) -> Self {
        self.base = Some(base);
        self
    }

    /// Mark as abstract
    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Mark as having a public parameterless constructor
    pub fn default_constructible(mut self) -> Self {
        self.has_default_constructor = true;
        self
    }

    /// Whether this is an interface
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    /// Whether this is a value type
    pub fn is_value_type(&self) -> bool {
        self.kind == TypeKind::Struct
    }

    /// Neither abstract nor an interface
    pub fn is_concrete(&self) -> bool {
        !self.is_abstract && !self.is_interface()
    }

    /// Reference to this definition (generic definition form when generic)
    pub fn reference(&self) -> TypeRef {
        TypeRef::definition_of(self.name.clone())
    }
}

/// Source of type descriptions
pub trait TypeCatalog: Send + Sync {
    /// Every type the engine may consider, in a stable order
    fn all_known_types(&self) -> Vec<Arc<TypeDescriptor>>;

    /// Look up one definition
    fn describe(&self, name: &TypeName) -> Option<Arc<TypeDescriptor>>;
}
