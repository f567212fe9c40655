//! # azsm
//!
//! Rust client for the Azure service management API supporting:
//! - Hosted service creation and deletion
//! - Deployment creation and deletion by slot or by name
//! - Management-certificate authentication over rustls
//! - Idempotent create/delete of hosted services
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use azsm::{Deployment, DeploymentSlot, HostedService, ServiceManagementClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ServiceManagementClient::builder()
//!         .subscription_id("my-subscription")
//!         .cert_file("/etc/azure/management.pem")
//!         .build()?;
//!
//!     let service = HostedService::new("my-service")
//!         .with_label("My Service")
//!         .with_location("West US");
//!     client.create_hosted_service(&service).await?;
//!
//!     let deployment = Deployment::new("v1")
//!         .with_package_url("https://storage.example.com/packages/app.cspkg")
//!         .with_label("v1")
//!         .with_configuration(std::fs::read("ServiceConfiguration.cscfg")?);
//!     let request_id = client
//!         .create_deployment(&deployment, "my-service", DeploymentSlot::Staging)
//!         .await?;
//!
//!     println!("deployment accepted: {}", request_id);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export commonly used types
pub use azsm_protocol::{Deployment, DeploymentSlot, HostedService, X_MS_VERSION};
pub use azsm_transport::{HttpRequest, HttpResponse, HttpTransport, Transport, TransportError};
pub use client::{ServiceManagementClient, ServiceManagementClientBuilder};
pub use config::{ServiceConfig, ServiceConfigBuilder};
pub use error::{Error, Result};
pub use resources::{DeploymentTarget, Deployments, HostedServiceRef, HostedServices};

// Module declarations
pub mod client;
pub mod config;
pub mod error;
pub mod observability;
pub mod resources;
pub mod translate;

#[cfg(feature = "blocking")]
#[cfg_attr(docsrs, doc(cfg(feature = "blocking")))]
pub mod blocking;

pub use async_trait::async_trait;

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use azsm::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Deployment, DeploymentSlot, DeploymentTarget, Error, HostedService, HostedServiceRef,
        Result, ServiceConfig, ServiceManagementClient,
    };
}

/// Crate version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default management endpoint
pub const DEFAULT_MANAGEMENT_URL: &str = "https://management.core.windows.net";

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing if a global subscriber is already set.
#[cfg(feature = "trace")]
#[cfg_attr(docsrs, doc(cfg(feature = "trace")))]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("azsm=info")),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_constants() {
        assert_eq!(DEFAULT_MANAGEMENT_URL, "https://management.core.windows.net");
        assert_eq!(X_MS_VERSION, "2010-10-28");
    }
}
