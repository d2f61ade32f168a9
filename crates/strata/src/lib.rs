//! # strata
//!
//! A dependency-injection composition engine: registration records in,
//! a layered container configuration out.
//!
//! ## Features
//!
//! - **Conditions**: records gated by active tags
//! - **Decorators and composites**: ordered layers folded onto base registrations
//! - **Open generics**: expanded against constraint-satisfying arguments
//! - **Dispatch composites**: per-argument-type handler tables
//!
//! ## Example
//!
//! ```ignore
//! use strata::infrastructure::{Composer, InMemoryTypeCatalog, ServiceCollection};
//!
//! let composer = Composer::default();
//! let mut services = ServiceCollection::new();
//! let composition = composer.compose(&catalog, &records, &mut services)?;
//! let provider = services.build_provider(activators);
//! ```
//!
//! ## Architecture
//!
//! - `domain` - type model, records, graph, ports and the error type
//! - `application` - the composition engine
//! - `infrastructure` - config, logging, manifests, in-memory container
//! - `report` - printable graph summaries

/// Domain layer - type model, records and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use strata_domain::*;
}

/// Application layer - the composition engine
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use strata_application::*;
}

/// Infrastructure layer - config, container and bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use strata_infrastructure::*;
}

pub mod report;

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the main entry points at the crate root
pub use application::{Composition, CompositionService};
pub use infrastructure::{Composer, ServiceCollection, ServiceProvider};
pub use report::GraphReport;
