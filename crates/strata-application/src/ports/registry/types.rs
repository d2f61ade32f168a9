//! Known Type Registry
//!
//! Types register themselves via `#[linkme::distributed_slice(KNOWN_TYPES)]`
//! and are collected into a [`LinkedTypeCatalog`] at runtime.

use std::collections::HashMap;
use std::sync::Arc;

use strata_domain::ports::{TypeCatalog, TypeDescriptor};
use strata_domain::value_objects::TypeName;

/// Registry entry for one type description
///
/// # Example
///
/// ```ignore
/// #[linkme::distributed_slice(KNOWN_TYPES)]
/// static BATTERY: KnownTypeEntry = KnownTypeEntry {
///     name: "Shop.Battery",
///     describe: || TypeDescriptor::class("Shop", "Battery").implements(product()),
/// };
/// ```
pub struct KnownTypeEntry {
    /// Qualified name, for listings
    pub name: &'static str,
    /// Builds the descriptor
    pub describe: fn() -> TypeDescriptor,
}

// Auto-collection via linkme distributed slices - types submit entries at compile time
#[linkme::distributed_slice]
pub static KNOWN_TYPES: [KnownTypeEntry] = [..];

/// Type catalog assembled from [`KNOWN_TYPES`]
///
/// Entries keep slice order; a later entry for the same definition replaces
/// the earlier one in place.
#[derive(Debug, Clone, Default)]
pub struct LinkedTypeCatalog {
    types: Vec<Arc<TypeDescriptor>>,
    index: HashMap<TypeName, usize>,
}

impl LinkedTypeCatalog {
    /// Collect every linked entry
    pub fn collect() -> Self {
        Self::from_entries(KNOWN_TYPES.iter())
    }

    /// Build from an explicit entry list
    pub fn from_entries<'e>(entries: impl IntoIterator<Item = &'e KnownTypeEntry>) -> Self {
        let mut catalog = Self::default();
        for entry in entries {
            let descriptor = (entry.describe)();
            match catalog.index.get(&descriptor.name) {
                Some(&position) => catalog.types[position] = Arc::new(descriptor),
                None => {
                    catalog
                        .index
                        .insert(descriptor.name.clone(), catalog.types.len());
                    catalog.types.push(Arc::new(descriptor));
                }
            }
        }
        catalog
    }

    /// Number of distinct definitions
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeCatalog for LinkedTypeCatalog {
    fn all_known_types(&self) -> Vec<Arc<TypeDescriptor>> {
        self.types.clone()
    }

    fn describe(&self, name: &TypeName) -> Option<Arc<TypeDescriptor>> {
        self.index.get(name).map(|&i| Arc::clone(&self.types[i]))
    }
}

/// List all linked type names
pub fn list_known_types() -> Vec<&'static str> {
    KNOWN_TYPES.iter().map(|e| e.name).collect()
}
