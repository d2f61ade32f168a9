//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Domain-specific constants are defined in `strata_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "strata.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "strata";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "STRATA";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "STRATA_LOG";

/// Log file rotation size in bytes (10MB)
pub const LOG_ROTATION_SIZE: u64 = 10 * 1024 * 1024;

/// Maximum number of rotated log files to keep
pub const LOG_MAX_FILES: usize = 5;

// ============================================================================
// CONTAINER CONSTANTS
// ============================================================================

/// Adapter name reported in errors
pub const IN_MEMORY_ADAPTER_NAME: &str = "in-memory";

/// Scope identifier of the root provider; singletons are cached under it
pub const ROOT_SCOPE_ID: u64 = 0;
