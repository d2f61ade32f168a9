// Clippy allows for complex patterns in infrastructure code
#![allow(clippy::collapsible_if)]

//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns around the composition engine.
//!
//! ### Configuration & Bootstrap
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML + environment configuration via Figment |
//! | [`constants`] | Centralized configuration constants |
//! | [`di`] | Composer bootstrap and runtime dispatchers |
//! | [`manifest`] | Registration manifests (JSON/TOML) |
//!
//! ### Container
//! | Module | Description |
//! |--------|-------------|
//! | [`catalog`] | In-memory type catalog |
//! | [`container`] | In-memory container adapter and service provider |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

pub mod catalog;
pub mod config;
pub mod constants;
pub mod container;
pub mod di;
pub mod error_ext;
pub mod logging;
pub mod manifest;

// Re-export commonly used types
pub use catalog::InMemoryTypeCatalog;
pub use container::{ActivatorRegistry, Instance, ServiceCollection, ServiceProvider};
pub use di::{CompositeDispatcher, Composer};
pub use error_ext::ErrorContext;
pub use manifest::RegistrationManifest;
