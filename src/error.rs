//! Error handling for FlowTracker2 conversion operations.
//!
//! Provides the crate-wide error type, the tagged error returned by the
//! instrument file reader, and helpers that render nested cause chains for
//! diagnostics.

use std::error::Error as StdError;
use std::path::PathBuf;
use thiserror::Error;

/// Boxed error used for opaque causes
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Comprehensive error types for conversion operations
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization failed
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A recognised but unhandled instrument setting
    #[error("Unsupported configuration: {message}")]
    UnsupportedConfiguration { message: String },

    /// The measurement could not be mapped into a discharge activity
    #[error("Transform failed: {message}")]
    Transform {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Site number unknown to the location resolver
    #[error("Location not found: {identifier}")]
    LocationNotFound { identifier: String },

    /// Location registry could not be loaded
    #[error("Location registry error in '{}': {message}", path.display())]
    LocationRegistry { path: PathBuf, message: String },

    /// Results sink rejected an operation
    #[error("Results sink error: {message}")]
    Sink { message: String },

    /// Conversion stopped before all files were handled
    #[error("Interrupted: {message}")]
    Interrupted { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a JSON error with context
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an unsupported configuration error
    pub fn unsupported_configuration(message: impl Into<String>) -> Self {
        Self::UnsupportedConfiguration {
            message: message.into(),
        }
    }

    /// Create a transform error without an underlying cause
    pub fn transform(message: impl Into<String>) -> Self {
        Self::Transform {
            message: message.into(),
            source: None,
        }
    }

    /// Create a transform error wrapping the error that caused it
    pub fn transform_with_source(
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Transform {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a location not found error
    pub fn location_not_found(identifier: impl Into<String>) -> Self {
        Self::LocationNotFound {
            identifier: identifier.into(),
        }
    }

    /// Create a location registry error
    pub fn location_registry(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::LocationRegistry {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a results sink error
    pub fn sink(message: impl Into<String>) -> Self {
        Self::Sink {
            message: message.into(),
        }
    }

    /// Create an interruption error
    pub fn interrupted(message: impl Into<String>) -> Self {
        Self::Interrupted {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure signalled by an instrument file reader.
///
/// The orchestrator dispatches on the variant: a format mismatch means the
/// bytes belong to some other instrument, malformed content means they are
/// ours but unusable.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("not a FlowTracker2 measurement: {reason}")]
    FormatMismatch { reason: String },

    #[error("malformed FlowTracker2 measurement: {reason}")]
    MalformedContent {
        reason: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("measurement could not be read: {0}")]
    Other(#[source] BoxError),
}

impl ReadError {
    pub fn format_mismatch(reason: impl Into<String>) -> Self {
        Self::FormatMismatch {
            reason: reason.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>, source: Option<BoxError>) -> Self {
        Self::MalformedContent {
            reason: reason.into(),
            source,
        }
    }
}

/// Collect the messages of an error and all of its nested causes, outermost first
pub fn error_chain(error: &(dyn StdError + 'static)) -> Vec<String> {
    let mut chain = vec![error.to_string()];
    if let Some(source) = error.source() {
        chain.extend(error_chain(source));
    }
    chain
}

/// Render an error and its causes as an indented, multi-line report
pub fn render_error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut rendered = String::new();
    for (depth, message) in error_chain(error).iter().enumerate() {
        if depth == 0 {
            rendered.push_str(message);
        } else {
            rendered.push('\n');
            rendered.push_str(&"  ".repeat(depth));
            rendered.push_str("caused by: ");
            rendered.push_str(message);
        }
    }
    rendered
}
