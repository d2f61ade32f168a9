//! Use cases

pub mod compose;

pub use compose::{Composition, CompositionService};
