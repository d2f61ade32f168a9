//! Application ports
//!
//! Compile-time registries the engine can read from.

pub mod registry;

pub use registry::*;
