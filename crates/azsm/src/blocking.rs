//! Blocking client
//!
//! Wraps the async client with a private current-thread runtime. Do not use
//! it from inside another tokio runtime; call the async client there.

use std::sync::Arc;

use azsm_protocol::{Deployment, DeploymentSlot, HostedService};
use azsm_transport::Transport;
use tokio::runtime::{Builder, Runtime};

use crate::{
    config::ServiceConfig,
    error::{Error, Result},
    resources::{DeploymentTarget, HostedServiceRef},
};

/// Blocking counterpart of [`crate::ServiceManagementClient`].
///
/// ```rust,no_run
/// use azsm::{DeploymentSlot, ServiceConfig, blocking::ServiceManagementClient};
///
/// # fn example() -> azsm::Result<()> {
/// let config = ServiceConfig::builder()
///     .subscription_id("my-subscription")
///     .cert_file("/etc/azure/management.pem")
///     .build();
/// let client = ServiceManagementClient::from_config(config)?;
/// let request_id = client.delete_deployment("my-service", DeploymentSlot::Staging)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ServiceManagementClient {
    inner: crate::ServiceManagementClient,
    runtime: Runtime,
}

impl ServiceManagementClient {
    /// Create a blocking client from a configuration object.
    pub fn from_config(config: ServiceConfig) -> Result<Self> {
        Self::wrap(crate::ServiceManagementClient::from_config(config)?)
    }

    /// Create a blocking client over a caller-supplied transport.
    pub fn from_transport(config: ServiceConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        Self::wrap(crate::ServiceManagementClient::from_transport(
            config, transport,
        )?)
    }

    /// Wrap an existing async client.
    pub fn wrap(inner: crate::ServiceManagementClient) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Config(format!("cannot start runtime: {}", e)))?;
        Ok(Self { inner, runtime })
    }

    /// The async client this wraps.
    pub fn as_async(&self) -> &crate::ServiceManagementClient {
        &self.inner
    }

    /// Create a hosted service. `false` if it already exists.
    pub fn create_hosted_service(&self, service: &HostedService) -> Result<bool> {
        self.runtime
            .block_on(self.inner.create_hosted_service(service))
    }

    /// Delete a hosted service. `false` if it does not exist.
    pub fn delete_hosted_service<'a>(
        &self,
        service: impl Into<HostedServiceRef<'a>>,
    ) -> Result<bool> {
        self.runtime
            .block_on(self.inner.delete_hosted_service(service))
    }

    /// Create a deployment and return its request id.
    pub fn create_deployment(
        &self,
        deployment: &Deployment,
        service_name: &str,
        slot: DeploymentSlot,
    ) -> Result<String> {
        self.runtime
            .block_on(self.inner.create_deployment(deployment, service_name, slot))
    }

    /// Delete a deployment and return its request id.
    pub fn delete_deployment(
        &self,
        service_name: &str,
        target: impl Into<DeploymentTarget>,
    ) -> Result<String> {
        self.runtime
            .block_on(self.inner.delete_deployment(service_name, target))
    }
}
