//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the strata composition engine
#[derive(Error, Debug)]
pub enum Error {
    /// A decorator targets a service that has neither a base implementation
    /// nor a composite in the same layer set
    #[error(
        "Decorator '{decorator}' targets service '{service}' which has no base implementation"
    )]
    DecoratorWithoutBase {
        /// Service type the decorator was declared for
        service: String,
        /// Decorator implementation type
        decorator: String,
    },

    /// A keyed decorator or composite was applied through an adapter that
    /// cannot layer keyed descriptors
    #[error(
        "Adapter '{adapter}' does not support keyed layers (service '{service}', layer '{implementation}')"
    )]
    KeyedLayerUnsupported {
        /// Adapter name
        adapter: String,
        /// Service type being layered
        service: String,
        /// Keyed layer implementation type
        implementation: String,
    },

    /// A registration kind value that the engine does not know about
    #[error("Unknown registration kind: {value}")]
    UnknownRegistrationKind {
        /// The offending value
        value: String,
    },

    /// A second registration for the same service and key under the `Throw` policy
    #[error("Service '{service}'{key} is already registered; refusing to add '{implementation}'")]
    DuplicateRegistration {
        /// Service type
        service: String,
        /// Rendered key suffix (empty for unkeyed registrations)
        key: String,
        /// Implementation that was about to be added
        implementation: String,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Resource not found error
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Service instance construction failed
    #[error("Activation of '{service}' failed: {message}")]
    Activation {
        /// Service type being resolved
        service: String,
        /// Description of the failure
        message: String,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Infrastructure operation error
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

// Composition error creation methods
impl Error {
    /// Create a decorator-without-base error
    pub fn decorator_without_base<S: Into<String>, D: Into<String>>(service: S, decorator: D) -> Self {
        Self::DecoratorWithoutBase {
            service: service.into(),
            decorator: decorator.into(),
        }
    }

    /// Create a keyed-layer-unsupported error
    pub fn keyed_layer_unsupported<A, S, I>(adapter: A, service: S, implementation: I) -> Self
    where
        A: Into<String>,
        S: Into<String>,
        I: Into<String>,
    {
        Self::KeyedLayerUnsupported {
            adapter: adapter.into(),
            service: service.into(),
            implementation: implementation.into(),
        }
    }

    /// Create an unknown registration kind error
    pub fn unknown_registration_kind<S: Into<String>>(value: S) -> Self {
        Self::UnknownRegistrationKind {
            value: value.into(),
        }
    }

    /// Create an activation error
    pub fn activation<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::Activation {
            service: service.into(),
            message: message.into(),
        }
    }
}

// Basic error creation methods
impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an infrastructure error
    pub fn infrastructure<S: Into<String>>(message: S) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: None,
        }
    }

    /// Whether this error is a wiring mistake detected while composing
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::DecoratorWithoutBase { .. }
                | Self::KeyedLayerUnsupported { .. }
                | Self::UnknownRegistrationKind { .. }
                | Self::DuplicateRegistration { .. }
                | Self::Configuration { .. }
        )
    }
}
