//! Configuration
//!
//! Defaults, TOML files and `STRATA_`-prefixed environment variables merged
//! through Figment.

pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, validate_app_config};
pub use types::*;
