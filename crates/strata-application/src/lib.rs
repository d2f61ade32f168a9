//! Application Layer - strata
//!
//! The composition engine proper. Everything here is pure over its inputs
//! except the layering engine, which drives a [`ContainerAdapter`].
//!
//! ## Pipeline
//!
//! ```text
//! RegistrationRecord[] ──► conditions + service types ──► RegistrationEntry[]
//!                                                              │
//!                                     OpenGenericMaterializer ◄┘
//!                                                              │
//!                                     RegistrationGraphBuilder ◄┘
//!                                          │                 │
//!                                  LayeringEngine     DispatchPlanner
//!                                  (adapter)          (call sites)
//! ```
//!
//! [`ContainerAdapter`]: strata_domain::ports::ContainerAdapter

pub mod domain_services;
pub mod ports;
pub mod use_cases;

pub use domain_services::*;
pub use ports::*;
pub use use_cases::*;
