//! Configuration types module

pub mod app;
pub mod composition;
pub mod logging;

// Re-export main types
pub use app::AppConfig;
pub use composition::CompositionConfig;
pub use logging::LoggingConfig;
