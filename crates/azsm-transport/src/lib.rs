//! Transport layer for the Azure service management client
//!
//! Provides a trait-based transport abstraction so the request pipeline can
//! run against the real management endpoint or an in-process double.
//!
//! # Architecture
//!
//! - **Transport trait**: one authenticated request/response exchange
//! - **HTTP transport**: reqwest client presenting a management certificate
//! - **Error handling**: non-2xx outcomes surface as [`TransportError::Status`]
//!
//! # Usage
//!
//! ```ignore
//! use azsm_transport::{HttpRequest, HttpTransport, Transport};
//!
//! let transport = HttpTransport::new()?;
//! let request = HttpRequest::new("GET", "https://management.core.windows.net/sub/services/hostedservices")
//!     .with_header("x-ms-version", "2010-10-28");
//! let response = transport.perform(request).await?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod http;
pub mod traits;

pub use error::{Result, TransportError};
pub use http::{ClientIdentity, HttpTransport, HttpTransportConfig};
pub use traits::{HttpRequest, HttpResponse, Transport};
