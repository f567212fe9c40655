//! Service management resources
//!
//! Each resource wraps a cheap clone of the client and owns the paths and
//! result policy of its operations.

pub mod deployments;
pub mod hosted_services;

pub use deployments::{DeploymentTarget, Deployments};
pub use hosted_services::{HostedServiceRef, HostedServices};

use crate::error::{Error, Result};

/// Check that `value` can be used verbatim as one URL path segment.
///
/// Dot segments are rejected because URL normalization would collapse them
/// onto the parent collection. `%` is rejected so no segment is decoded
/// into something else on the server.
pub(crate) fn validate_path_segment<'a>(kind: &str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("{} is required", kind)));
    }
    if matches!(value, "." | "..") {
        return Err(Error::Validation(format!(
            "{} '{}' is not a valid name",
            kind, value
        )));
    }
    if value.contains(['/', '?', '#', '%']) {
        return Err(Error::Validation(format!(
            "{} '{}' must not contain '/', '?', '#' or '%'",
            kind, value
        )));
    }
    Ok(value)
}
