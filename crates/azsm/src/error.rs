//! Error types for the service management client
//!
//! Every failure a caller can see is one of four kinds: a caller-contract
//! violation caught before any request is sent, a 409 conflict, a 404 missing
//! resource, or anything else the service or the transport reported.

use azsm_protocol::ProtocolError;
use azsm_transport::TransportError;
use thiserror::Error;

/// Result type alias for service management operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the service management client.
#[derive(Debug, Error)]
pub enum Error {
    /// A required argument was missing or empty. Raised before any network call.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The resource already exists (409).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The resource does not exist (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Any other failure status, transport fault, or broken response contract.
    #[error("Unknown service error: {message}")]
    UnknownService {
        /// HTTP status code, when the failure came with one
        status: Option<u16>,
        /// Original message, kept for diagnostics
        message: String,
    },

    /// The client could not be configured.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// `true` for [`Error::Conflict`].
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict(_))
    }

    /// `true` for [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// `true` for [`Error::Validation`].
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// HTTP status associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Conflict(_) => Some(409),
            Error::NotFound(_) => Some(404),
            Error::UnknownService { status, .. } => *status,
            Error::Validation(_) | Error::Config(_) => None,
        }
    }
}

impl From<ProtocolError> for Error {
    fn from(err: ProtocolError) -> Self {
        Error::Validation(err.to_string())
    }
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        crate::translate::classify_fault(err)
    }
}
