//! In-memory container
//!
//! A small reference container implementing [`ContainerAdapter`], so the
//! engine can be exercised end to end without a host framework.
//!
//! | Type | Role |
//! |------|------|
//! | [`ServiceCollection`] | Adapter: descriptors in registration order |
//! | [`ServiceProvider`] | Resolves descriptors, caches by lifetime |
//! | [`ActivatorRegistry`] | Constructors per implementation definition |
//!
//! [`ContainerAdapter`]: strata_domain::ports::ContainerAdapter

pub mod activator;
pub mod collection;
pub mod descriptor;
pub mod instance;
pub mod provider;

pub use activator::{ACTIVATORS, ActivationContext, ActivatorEntry, ActivatorFn, ActivatorRegistry};
pub use collection::ServiceCollection;
pub use descriptor::{Activation, DescriptorId, ServiceDescriptor};
pub use instance::Instance;
pub use provider::{ScopeId, ServiceProvider};
