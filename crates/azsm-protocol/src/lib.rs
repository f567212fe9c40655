//! Domain types and wire encoding for the Azure service management API
//!
//! This crate holds everything about a service management call that can be
//! decided without touching the network: the resources being managed, the XML
//! bodies the API expects, and the header set every request must carry.
//!
//! # Organization
//!
//! - **Domain model**: [`model`] - hosted services, deployments, slots
//! - **XML encoding**: [`xml`] - `CreateHostedService` / `CreateDeployment` bodies
//! - **Headers**: [`headers`] - version, content-length and content-type rules
//! - **Requests**: [`request`] - the transient request value handed to a transport
//! - **Errors**: [`error`] - encoding failures
//!
//! # Design Principles
//!
//! - **Zero I/O**: every function here is pure
//! - **Deterministic**: the same input always produces byte-identical output
//! - **Ordered headers**: header order is preserved end to end
//!
//! # Usage
//!
//! ```
//! use azsm_protocol::{HostedService, xml::encode_hosted_service_create};
//!
//! let service = HostedService::new("my-service")
//!     .with_label("My Service")
//!     .with_location("West US");
//!
//! let body = encode_hosted_service_create(&service).unwrap();
//! assert!(body.contains("<ServiceName>my-service</ServiceName>"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod headers;
pub mod model;
pub mod request;
pub mod xml;

pub use error::{ProtocolError, Result};
pub use headers::build_headers;
pub use model::{Deployment, DeploymentSlot, HostedService};
pub use request::ServiceRequest;

/// Default value of the `x-ms-version` header sent with every request.
pub const X_MS_VERSION: &str = "2010-10-28";

/// XML namespace of service management request documents.
pub const XML_NAMESPACE: &str = "http://schemas.microsoft.com/windowsazure";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(X_MS_VERSION, "2010-10-28");
        assert_eq!(XML_NAMESPACE, "http://schemas.microsoft.com/windowsazure");
    }
}
