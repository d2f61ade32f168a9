//! # Domain Layer
//!
//! Core value objects and port traits for the strata composition engine.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`value_objects`] | Type references, registration records, entries and the registration graph |
//! | [`ports`] | Type catalog and container adapter contracts |
//! | [`error`] | Domain error type and `Result` alias |
//! | [`constants`] | Domain-wide constants |
//!
//! The domain has no knowledge of any concrete container or of how records are
//! produced. It only describes what a registration is and what the engine
//! needs from its collaborators.

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::*;
pub use value_objects::*;
