//! Deployment operations

use azsm_protocol::{Deployment, DeploymentSlot, xml};
use std::fmt;
use tracing::instrument;

use super::validate_path_segment;
use crate::{
    client::ServiceManagementClient,
    error::{Error, Result},
    translate::require_request_id,
};

/// Which deployment of a hosted service an operation addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentTarget {
    /// Whatever is deployed in this slot
    Slot(DeploymentSlot),
    /// The deployment with this name
    Name(String),
}

impl DeploymentTarget {
    /// Resolve from optional parts.
    ///
    /// The slot takes precedence when both are given; neither is a
    /// validation error.
    pub fn from_parts(name: Option<&str>, slot: Option<DeploymentSlot>) -> Result<Self> {
        match (slot, name) {
            (Some(slot), _) => Ok(Self::Slot(slot)),
            (None, Some(name)) => Ok(Self::Name(name.to_string())),
            (None, None) => Err(Error::Validation(
                "either a deployment name or a deployment slot is required".to_string(),
            )),
        }
    }

    /// Path below the hosted service.
    fn path_suffix(&self) -> Result<String> {
        match self {
            Self::Slot(slot) => Ok(format!("deploymentslots/{}", slot)),
            Self::Name(name) => Ok(format!(
                "deployments/{}",
                validate_path_segment("deployment name", name)?
            )),
        }
    }
}

impl From<DeploymentSlot> for DeploymentTarget {
    fn from(slot: DeploymentSlot) -> Self {
        Self::Slot(slot)
    }
}

impl From<&str> for DeploymentTarget {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for DeploymentTarget {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl fmt::Display for DeploymentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slot(slot) => write!(f, "slot:{}", slot),
            Self::Name(name) => write!(f, "name:{}", name),
        }
    }
}

/// Deployment operations.
#[derive(Clone, Debug)]
pub struct Deployments {
    client: ServiceManagementClient,
}

impl Deployments {
    pub(crate) fn new(client: ServiceManagementClient) -> Self {
        Self { client }
    }

    /// Create a deployment in `slot` of `service_name`.
    ///
    /// Returns the `x-ms-request-id` of the accepted operation. Conflicts and
    /// missing services are returned as errors.
    #[instrument(
        skip_all,
        fields(
            subscription = %self.client.subscription_id(),
            service = %service_name,
            slot = %slot,
            deployment = %deployment.name
        )
    )]
    pub async fn create(
        &self,
        deployment: &Deployment,
        service_name: &str,
        slot: DeploymentSlot,
    ) -> Result<String> {
        let service_name = validate_path_segment("service name", service_name)?;
        let body = xml::encode_deployment_create(deployment)?;
        let request = self
            .client
            .request(
                http::Method::POST,
                &format!("services/hostedservices/{}/deploymentslots/{}", service_name, slot),
            )
            .with_body(body);

        let response = self.client.execute(request).await?;
        require_request_id(&response)
    }

    /// Delete the deployment addressed by `target`.
    ///
    /// Returns the `x-ms-request-id` of the accepted operation.
    #[instrument(
        skip_all,
        fields(
            subscription = %self.client.subscription_id(),
            service = %service_name,
            target = %target
        )
    )]
    pub async fn delete(&self, service_name: &str, target: DeploymentTarget) -> Result<String> {
        let service_name = validate_path_segment("service name", service_name)?;
        let suffix = target.path_suffix()?;
        let request = self.client.request(
            http::Method::DELETE,
            &format!("services/hostedservices/{}/{}", service_name, suffix),
        );

        let response = self.client.execute(request).await?;
        require_request_id(&response)
    }
}
