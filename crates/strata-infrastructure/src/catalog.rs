//! In-memory type catalog
//!
//! Hosts that describe their types explicitly (manifests, tests, generated
//! code) hand the engine an [`InMemoryTypeCatalog`].

use std::collections::HashMap;
use std::sync::Arc;

use strata_domain::ports::{TypeCatalog, TypeDescriptor};
use strata_domain::value_objects::TypeName;

/// Type catalog backed by a vector and a name index
///
/// Insertion order is the enumeration order. Adding a descriptor for a name
/// already present replaces it in place.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTypeCatalog {
    types: Vec<Arc<TypeDescriptor>>,
    index: HashMap<TypeName, usize>,
}

impl InMemoryTypeCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`add`](Self::add)
    pub fn with_type(mut self, descriptor: TypeDescriptor) -> Self {
        self.add(descriptor);
        self
    }

    /// Add or replace a descriptor
    pub fn add(&mut self, descriptor: TypeDescriptor) {
        let descriptor = Arc::new(descriptor);
        match self.index.get(&descriptor.name) {
            Some(&position) => self.types[position] = descriptor,
            None => {
                self.index.insert(descriptor.name.clone(), self.types.len());
                self.types.push(descriptor);
            }
        }
    }

    /// Number of described definitions
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether nothing is described
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl FromIterator<TypeDescriptor> for InMemoryTypeCatalog {
    fn from_iter<I: IntoIterator<Item = TypeDescriptor>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for descriptor in iter {
            catalog.add(descriptor);
        }
        catalog
    }
}

impl TypeCatalog for InMemoryTypeCatalog {
    fn all_known_types(&self) -> Vec<Arc<TypeDescriptor>> {
        self.types.clone()
    }

    fn describe(&self, name: &TypeName) -> Option<Arc<TypeDescriptor>> {
        self.index.get(name).map(|&i| Arc::clone(&self.types[i]))
    }
}
