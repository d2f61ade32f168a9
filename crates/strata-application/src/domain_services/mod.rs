//! Domain services
//!
//! The composition engine components, leaves first.

pub mod conditions;
pub mod dispatch;
pub mod graph_builder;
pub mod layering;
pub mod materializer;
pub mod service_types;
pub mod type_system;

pub use conditions::{ActiveConditions, condition_label, is_matched};
pub use dispatch::{DispatchCase, DispatchPlan, DispatchPlanner};
pub use graph_builder::{RegistrationGraphBuilder, compare_layers, entries_for};
pub use layering::{ApplySummary, LayeringEngine, infer_composite_lifetime};
pub use materializer::{Materialization, OpenGenericMaterializer};
pub use service_types::ServiceTypeResolver;
pub use type_system::{ConstraintViolation, TypeSystem};
