//! Transport error types

use thiserror::Error;

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors that can occur in transport operations
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with a non-2xx status
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, or the reason phrase when the body was empty
        message: String,
    },

    /// Connection could not be established
    #[error("Connection error: {0}")]
    Connection(String),

    /// Request did not complete in time
    #[error("Timeout")]
    Timeout,

    /// Client certificate or key could not be loaded
    #[error("Client identity error: {0}")]
    Identity(String),

    /// Request could not be built or sent
    #[error("HTTP error: {0}")]
    Http(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TransportError {
    /// HTTP status code carried by a [`TransportError::Status`] fault.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}
