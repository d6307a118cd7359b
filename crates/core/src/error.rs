//! Error types for Conduit.

use alloc::string::String;
use core::fmt;

/// Result type alias for Conduit operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for Conduit operations.
///
/// Most of these are contract violations: the infallible entry points
/// (`StateSource::set`) panic with the error instead of returning it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The object backing an adapter source has been dropped.
    SourceGone {
        key: String,
    },
    /// The target cannot represent the supplied value (e.g. an absent
    /// value written to a non-optional property).
    Unrepresentable {
        key: String,
    },
    /// Invalid configuration value.
    InvalidConfig {
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SourceGone { key } => {
                write!(f, "Source gone: backing object for {} was dropped", key)
            }
            Error::Unrepresentable { key } => {
                write!(f, "Unrepresentable value: {} cannot hold an absent value", key)
            }
            Error::InvalidConfig { message } => {
                write!(f, "Invalid configuration: {}", message)
            }
        }
    }
}

impl Error {
    /// Creates a source gone error.
    pub fn source_gone(key: impl Into<String>) -> Self {
        Error::SourceGone { key: key.into() }
    }

    /// Creates an unrepresentable value error.
    pub fn unrepresentable(key: impl Into<String>) -> Self {
        Error::Unrepresentable { key: key.into() }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Error::InvalidConfig {
            message: message.into(),
        }
    }
}
