//! Main application configuration

use serde::{Deserialize, Serialize};

use super::composition::CompositionConfig;
use super::logging::LoggingConfig;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Composition engine settings
    #[serde(default)]
    pub composition: CompositionConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}
