//! Type system queries over a [`TypeCatalog`]
//!
//! Interface discovery, assignability and generic closing with constraint
//! checks. A failed close is reported as a [`ConstraintViolation`] value: it
//! is an expected negative answer, never an engine error.

use std::collections::HashSet;
use std::sync::Arc;

use strata_domain::constants::OBJECT_TYPE_NAME;
use strata_domain::ports::{GenericParameter, TypeCatalog, TypeDescriptor};
use strata_domain::value_objects::{TypeName, TypeRef};
use thiserror::Error;

/// Why a type could not be closed over a set of arguments
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintViolation {
    #[error("'{0}' is a generic parameter, not a named type")]
    NotNamed(String),

    #[error("type '{0}' is not in the catalog")]
    UnknownType(String),

    #[error("'{definition}' expects {expected} argument(s), got {actual}")]
    ArityMismatch {
        definition: String,
        expected: usize,
        actual: usize,
    },

    #[error("argument '{0}' is still open")]
    OpenArgument(String),

    #[error("'{argument}' is not a reference type (parameter {parameter})")]
    NotReferenceType { argument: String, parameter: String },

    #[error("'{argument}' is not a value type (parameter {parameter})")]
    NotValueType { argument: String, parameter: String },

    #[error("'{argument}' has no public parameterless constructor (parameter {parameter})")]
    MissingDefaultConstructor { argument: String, parameter: String },

    #[error("'{argument}' is not assignable to '{constraint}' (parameter {parameter})")]
    NotAssignable {
        argument: String,
        constraint: String,
        parameter: String,
    },
}

/// Catalog-backed type queries
pub struct TypeSystem<'a> {
    catalog: &'a dyn TypeCatalog,
    builtin_namespace: String,
}

impl<'a> TypeSystem<'a> {
    /// Create over `catalog`, treating `builtin_namespace` as the platform's own types
    pub fn new(catalog: &'a dyn TypeCatalog, builtin_namespace: impl Into<String>) -> Self {
        Self {
            catalog,
            builtin_namespace: builtin_namespace.into(),
        }
    }

    /// Underlying catalog
    pub fn catalog(&self) -> &'a dyn TypeCatalog {
        self.catalog
    }

    /// Namespace of the platform's built-in types
    pub fn builtin_namespace(&self) -> &str {
        &self.builtin_namespace
    }

    /// Catalog entry for the definition behind `ty`
    pub fn describe(&self, ty: &TypeRef) -> Option<Arc<TypeDescriptor>> {
        ty.definition().and_then(|name| self.catalog.describe(name))
    }

    /// Generic parameter `position` of `definition`
    pub fn parameter(&self, definition: &TypeName, position: usize) -> Option<GenericParameter> {
        self.catalog
            .describe(definition)
            .and_then(|d| d.generic_parameters.get(position).cloned())
    }

    /// Whether `ty` belongs to the built-in namespace
    pub fn is_builtin(&self, ty: &TypeRef) -> bool {
        ty.definition()
            .is_some_and(|name| name.is_in_namespace(&self.builtin_namespace))
    }

    /// Whether `ty` is the universal top type
    pub fn is_object(&self, ty: &TypeRef) -> bool {
        ty.definition().is_some_and(|name| {
            name.arity == 0 && name.name == OBJECT_TYPE_NAME && name.namespace == self.builtin_namespace
        })
    }

    /// Every interface `ty` implements, directly or through its bases and
    /// extended interfaces, with generic arguments substituted
    pub fn interfaces_of(&self, ty: &TypeRef) -> Vec<TypeRef> {
        let mut found = Vec::new();
        let mut seen = HashSet::new();
        let mut visiting = HashSet::new();
        self.collect_interfaces(ty, &mut found, &mut seen, &mut visiting);
        found
    }

    fn collect_interfaces(
        &self,
        ty: &TypeRef,
        found: &mut Vec<TypeRef>,
        seen: &mut HashSet<TypeRef>,
        visiting: &mut HashSet<TypeRef>,
    ) {
        if !visiting.insert(ty.clone()) {
            return;
        }
        let Some(descriptor) = self.describe(ty) else {
            return;
        };
        let arguments = ty.arguments();
        for interface in &descriptor.interfaces {
            let interface = interface.substitute(arguments);
            if seen.insert(interface.clone()) {
                found.push(interface.clone());
            }
            self.collect_interfaces(&interface, found, seen, visiting);
        }
        if let Some(base) = &descriptor.base {
            self.collect_interfaces(&base.substitute(arguments), found, seen, visiting);
        }
    }

    /// Base classes of `ty`, nearest first
    pub fn base_chain(&self, ty: &TypeRef) -> Vec<TypeRef> {
        let mut chain = Vec::new();
        let mut current = ty.clone();
        while let Some(descriptor) = self.describe(&current) {
            let Some(base) = &descriptor.base else {
                break;
            };
            let base = base.substitute(current.arguments());
            if chain.contains(&base) || base == *ty {
                break;
            }
            chain.push(base.clone());
            current = base;
        }
        chain
    }

    /// Whether a value of `from` can be used where `to` is expected
    pub fn is_assignable(&self, from: &TypeRef, to: &TypeRef) -> bool {
        if from == to || self.is_object(to) {
            return true;
        }
        self.base_chain(from).contains(to) || self.interfaces_of(from).contains(to)
    }

    /// Check `argument` against `parameter`; `arguments` closes constraint
    /// types that mention sibling parameters
    pub fn satisfies(
        &self,
        parameter: &GenericParameter,
        argument: &TypeRef,
        arguments: &[TypeRef],
    ) -> Result<(), ConstraintViolation> {
        if argument.contains_parameters() {
            return Err(ConstraintViolation::OpenArgument(argument.to_string()));
        }
        let descriptor = self
            .describe(argument)
            .ok_or_else(|| ConstraintViolation::UnknownType(argument.to_string()))?;
        let constraints = &parameter.constraints;

        if constraints.reference_type && descriptor.is_value_type() {
            return Err(ConstraintViolation::NotReferenceType {
                argument: argument.to_string(),
                parameter: parameter.name.clone(),
            });
        }
        if constraints.value_type && !descriptor.is_value_type() {
            return Err(ConstraintViolation::NotValueType {
                argument: argument.to_string(),
                parameter: parameter.name.clone(),
            });
        }
        if constraints.default_constructor
            && !descriptor.is_value_type()
            && !(descriptor.is_concrete() && descriptor.has_default_constructor)
        {
            return Err(ConstraintViolation::MissingDefaultConstructor {
                argument: argument.to_string(),
                parameter: parameter.name.clone(),
            });
        }
        for constraint in &constraints.types {
            let constraint = constraint.substitute(arguments);
            if !self.is_assignable(argument, &constraint) {
                return Err(ConstraintViolation::NotAssignable {
                    argument: argument.to_string(),
                    constraint: constraint.to_string(),
                    parameter: parameter.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Close the definition behind `definition` over `arguments`
    pub fn close(
        &self,
        definition: &TypeRef,
        arguments: &[TypeRef],
    ) -> Result<TypeRef, ConstraintViolation> {
        let name = definition
            .definition()
            .ok_or_else(|| ConstraintViolation::NotNamed(definition.to_string()))?;
        if name.arity != arguments.len() {
            return Err(ConstraintViolation::ArityMismatch {
                definition: name.to_string(),
                expected: name.arity,
                actual: arguments.len(),
            });
        }
        let descriptor = self
            .catalog
            .describe(name)
            .ok_or_else(|| ConstraintViolation::UnknownType(name.to_string()))?;
        for (parameter, argument) in descriptor.generic_parameters.iter().zip(arguments) {
            self.satisfies(parameter, argument, arguments)?;
        }
        Ok(TypeRef::Named {
            definition: name.clone(),
            arguments: arguments.to_vec(),
        })
    }

    /// Constraint types of `parameter` other than the top type
    pub fn explicit_type_constraints(&self, parameter: &GenericParameter) -> Vec<TypeRef> {
        parameter
            .constraints
            .types
            .iter()
            .filter(|t| !self.is_object(t))
            .cloned()
            .collect()
    }

    /// The single interface a one-parameter definition constrains its
    /// parameter to, if that is its only explicit type constraint
    pub fn single_interface_constraint(&self, definition: &TypeName) -> Option<TypeRef> {
        if definition.arity != 1 {
            return None;
        }
        let parameter = self.parameter(definition, 0)?;
        match self.explicit_type_constraints(&parameter).as_slice() {
            [only] if self.describe(only).is_some_and(|d| d.is_interface()) => Some(only.clone()),
            _ => None,
        }
    }
}
