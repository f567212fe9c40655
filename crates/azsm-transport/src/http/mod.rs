//! HTTP transport implementation
//!
//! Provides a reqwest-backed client that implements the Transport trait and
//! authenticates with a management certificate.

pub mod client;
pub mod identity;

pub use client::{HttpTransport, HttpTransportConfig};
pub use identity::ClientIdentity;
