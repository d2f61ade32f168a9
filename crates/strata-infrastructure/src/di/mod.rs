//! Composition root
//!
//! ```text
//! AppConfig → Composer → CompositionService → ServiceCollection → ServiceProvider
//!                                  │                                    │
//!                            DispatchPlan ──────────────────► CompositeDispatcher
//! ```

pub mod bootstrap;
pub mod dispatch;

pub use bootstrap::Composer;
pub use dispatch::CompositeDispatcher;
