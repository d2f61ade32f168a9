//! Type references
//!
//! The engine never inspects live types. Every implementation, service and
//! generic argument is described by a [`TypeRef`], which names a type
//! definition and, for generic definitions, the arguments it is closed over.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a type definition
///
/// Two closed types built from the same generic definition share a
/// `TypeName`; only their arguments differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeName {
    /// Dotted namespace (may be empty)
    #[serde(default)]
    pub namespace: String,
    /// Simple name without generic suffix
    pub name: String,
    /// Number of generic parameters (0 for non-generic types)
    #[serde(default)]
    pub arity: usize,
}

impl TypeName {
    /// Create a non-generic type name
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::generic(namespace, name, 0)
    }

    /// Create a generic type definition name with the given arity
    pub fn generic(namespace: impl Into<String>, name: impl Into<String>, arity: usize) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            arity,
        }
    }

    /// Namespace-qualified name without the arity suffix
    pub fn qualified(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Whether the type lives in `namespace` or one of its children
    pub fn is_in_namespace(&self, namespace: &str) -> bool {
        self.namespace == namespace
            || self
                .namespace
                .strip_prefix(namespace)
                .is_some_and(|rest| rest.starts_with('.'))
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.arity == 0 {
            write!(f, "{}", self.qualified())
        } else {
            write!(f, "{}`{}", self.qualified(), self.arity)
        }
    }
}

/// Reference to a type, possibly generic and possibly open
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    /// A named type, closed over `arguments` when its definition is generic
    Named {
        /// Definition being referenced
        definition: TypeName,
        /// Generic arguments, one per definition parameter
        #[serde(default)]
        arguments: Vec<TypeRef>,
    },
    /// Positional generic parameter of the enclosing definition
    Parameter {
        /// Zero-based parameter position
        position: usize,
    },
}

impl TypeRef {
    /// Reference a non-generic type
    pub fn named(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Named {
            definition: TypeName::new(namespace, name),
            arguments: Vec::new(),
        }
    }

    /// Reference a generic type applied to `arguments`
    ///
    /// The definition arity is taken from the argument count.
    pub fn generic(
        namespace: impl Into<String>,
        name: impl Into<String>,
        arguments: Vec<TypeRef>,
    ) -> Self {
        Self::Named {
            definition: TypeName::generic(namespace, name, arguments.len()),
            arguments,
        }
    }

    /// Reference a generic parameter by position
    pub fn parameter(position: usize) -> Self {
        Self::Parameter { position }
    }

    /// Reference the generic definition itself (`Name<T0, T1, ..>`)
    pub fn definition_of(definition: TypeName) -> Self {
        let arguments = (0..definition.arity).map(Self::parameter).collect();
        Self::Named {
            definition,
            arguments,
        }
    }

    /// Definition name, `None` for parameters
    pub fn definition(&self) -> Option<&TypeName> {
        match self {
            Self::Named { definition, .. } => Some(definition),
            Self::Parameter { .. } => None,
        }
    }

    /// Generic arguments (empty for non-generic types and parameters)
    pub fn arguments(&self) -> &[TypeRef] {
        match self {
            Self::Named { arguments, .. } => arguments,
            Self::Parameter { .. } => &[],
        }
    }

    /// Whether the referenced definition takes generic parameters
    pub fn is_generic(&self) -> bool {
        self.definition().is_some_and(|d| d.arity > 0)
    }

    /// Whether any generic parameter appears anywhere in this reference
    pub fn contains_parameters(&self) -> bool {
        match self {
            Self::Parameter { .. } => true,
            Self::Named { arguments, .. } => arguments.iter().any(Self::contains_parameters),
        }
    }

    /// Whether this is a generic definition: every argument is the
    /// definition's own parameter at the same position
    pub fn is_generic_definition(&self) -> bool {
        match self {
            Self::Named {
                definition,
                arguments,
            } => {
                definition.arity > 0
                    && arguments.len() == definition.arity
                    && arguments
                        .iter()
                        .enumerate()
                        .all(|(i, a)| matches!(a, Self::Parameter { position } if *position == i))
            }
            Self::Parameter { .. } => false,
        }
    }

    /// Reduce an open reference to its generic definition
    ///
    /// Closed references and parameters are returned unchanged.
    pub fn to_generic_definition(&self) -> Self {
        match self {
            Self::Named { definition, .. } if self.contains_parameters() => {
                Self::definition_of(definition.clone())
            }
            _ => self.clone(),
        }
    }

    /// Replace parameters with the given arguments by position
    ///
    /// Parameters without a matching argument are kept as they are.
    pub fn substitute(&self, arguments: &[TypeRef]) -> Self {
        match self {
            Self::Parameter { position } => arguments
                .get(*position)
                .cloned()
                .unwrap_or_else(|| self.clone()),
            Self::Named {
                definition,
                arguments: own,
            } => Self::Named {
                definition: definition.clone(),
                arguments: own.iter().map(|a| a.substitute(arguments)).collect(),
            },
        }
    }

    /// Whether both references share the same definition
    pub fn same_definition(&self, other: &TypeRef) -> bool {
        matches!((self.definition(), other.definition()), (Some(a), Some(b)) if a == b)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parameter { position: 0 } => write!(f, "T"),
            Self::Parameter { position } => write!(f, "T{position}"),
            Self::Named {
                definition,
                arguments,
            } => {
                write!(f, "{}", definition.qualified())?;
                if !arguments.is_empty() {
                    write!(f, "<")?;
                    for (i, argument) in arguments.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{argument}")?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
        }
    }
}
