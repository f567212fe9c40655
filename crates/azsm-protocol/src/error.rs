//! Error types for request encoding

use thiserror::Error;

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors that can occur while encoding a request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// A field the wire format requires was left empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A slot name that is neither `production` nor `staging`
    #[error("Invalid deployment slot: {0}")]
    InvalidSlot(String),
}
