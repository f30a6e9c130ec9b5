//! Error types for mcastmap

use thiserror::Error;

/// Result type alias for mcastmap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for mcastmap
#[derive(Error, Debug)]
pub enum Error {
    /// Network I/O error
    #[error("Network I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A device could not be reached or refused authentication
    #[error("Device '{host}' unreachable: {reason}")]
    Connectivity { host: String, reason: String },

    /// Session-level error (command execution, channel handling)
    #[error("Session error: {0}")]
    Session(String),

    /// Invalid parameter error
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Output serialization error
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Operation interrupted
    #[error("Operation interrupted: {0}")]
    Interrupted(String),
}

impl Error {
    /// Create a connectivity error for a specific device
    pub fn connectivity<H: Into<String>, R: Into<String>>(host: H, reason: R) -> Self {
        Error::Connectivity {
            host: host.into(),
            reason: reason.into(),
        }
    }

    /// Create a session error with a custom message
    pub fn session<S: Into<String>>(msg: S) -> Self {
        Error::Session(msg.into())
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter<S: Into<String>>(name: S, reason: S) -> Self {
        Error::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// True if this error names a specific unreachable device
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Error::Connectivity { .. })
    }
}
