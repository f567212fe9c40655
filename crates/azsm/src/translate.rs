//! Response and fault translation
//!
//! Turns transport outcomes into the client's error taxonomy and applies the
//! idempotency policy of the create/delete hosted service operations.

use azsm_transport::{HttpResponse, TransportError};
use tracing::info;

use crate::error::{Error, Result};

/// Header carrying the server-issued tracking identifier.
pub const REQUEST_ID_HEADER: &str = "x-ms-request-id";

/// Classify a transport fault.
///
/// Total over every input: 409 and 404 get their own kinds, any other
/// status or a fault without a status becomes [`Error::UnknownService`].
pub fn classify_fault(err: TransportError) -> Error {
    match err {
        TransportError::Status { status: 409, message } => Error::Conflict(message),
        TransportError::Status { status: 404, message } => Error::NotFound(message),
        TransportError::Status { status, message } => Error::UnknownService {
            status: Some(status),
            message,
        },
        other => Error::UnknownService {
            status: None,
            message: other.to_string(),
        },
    }
}

/// Extract the tracking identifier from a successful response.
///
/// A success without the header breaks the response contract and is
/// reported as [`Error::UnknownService`].
pub fn require_request_id(response: &HttpResponse) -> Result<String> {
    response
        .get_header(REQUEST_ID_HEADER)
        .map(str::to_string)
        .ok_or_else(|| Error::UnknownService {
            status: Some(response.status),
            message: format!("Cannot find header {} in response.", REQUEST_ID_HEADER),
        })
}

/// Idempotency policy for operations whose benign failure is not an error.
pub trait ServiceOutcome {
    /// `Ok` becomes `true`, a conflict becomes `false`.
    fn into_created(self) -> Result<bool>;

    /// `Ok` becomes `true`, a missing resource becomes `false`.
    fn into_deleted(self) -> Result<bool>;
}

impl<T> ServiceOutcome for Result<T> {
    fn into_created(self) -> Result<bool> {
        match self {
            Ok(_) => Ok(true),
            Err(Error::Conflict(message)) => {
                info!(%message, "Resource already exists");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    fn into_deleted(self) -> Result<bool> {
        match self {
            Ok(_) => Ok(true),
            Err(Error::NotFound(message)) => {
                info!(%message, "Resource already absent");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}
