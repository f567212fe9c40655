//! Hosted service operations

use azsm_protocol::{HostedService, xml};
use tracing::instrument;

use super::validate_path_segment;
use crate::{
    client::ServiceManagementClient,
    error::{Error, Result},
    translate::ServiceOutcome,
};

/// A hosted service named either directly or through the service itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostedServiceRef<'a> {
    /// Use the name of this service
    Service(&'a HostedService),
    /// Use this name
    Name(&'a str),
}

impl<'a> HostedServiceRef<'a> {
    /// Resolve from optional parts.
    ///
    /// The service wins when both are given. Neither, or a resolved name
    /// that is empty, is a validation error.
    pub fn from_parts(service: Option<&'a HostedService>, name: Option<&'a str>) -> Result<Self> {
        let resolved = match (service, name) {
            (Some(service), _) => Self::Service(service),
            (None, Some(name)) => Self::Name(name),
            (None, None) => {
                return Err(Error::Validation(
                    "either a hosted service or a service name is required".to_string(),
                ));
            }
        };

        if resolved.name().trim().is_empty() {
            return Err(Error::Validation("service name is required".to_string()));
        }
        Ok(resolved)
    }

    /// The hosted service name.
    pub fn name(&self) -> &'a str {
        match self {
            Self::Service(service) => &service.name,
            Self::Name(name) => name,
        }
    }
}

impl<'a> From<&'a HostedService> for HostedServiceRef<'a> {
    fn from(service: &'a HostedService) -> Self {
        Self::Service(service)
    }
}

impl<'a> From<&'a str> for HostedServiceRef<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<&'a String> for HostedServiceRef<'a> {
    fn from(name: &'a String) -> Self {
        Self::Name(name)
    }
}

/// Hosted service operations.
#[derive(Clone, Debug)]
pub struct HostedServices {
    client: ServiceManagementClient,
}

impl HostedServices {
    pub(crate) fn new(client: ServiceManagementClient) -> Self {
        Self { client }
    }

    /// Create a hosted service.
    ///
    /// Returns `Ok(false)` if a service with the same name already exists.
    /// `name`, `label` and `location` must be set; nothing is sent otherwise.
    #[instrument(
        skip_all,
        fields(subscription = %self.client.subscription_id(), service = %service.name)
    )]
    pub async fn create(&self, service: &HostedService) -> Result<bool> {
        let body = xml::encode_hosted_service_create(service)?;
        let request = self
            .client
            .request(http::Method::POST, "services/hostedservices")
            .with_body(body);

        self.client.execute(request).await.into_created()
    }

    /// Delete a hosted service.
    ///
    /// Returns `Ok(false)` if the service does not exist.
    #[instrument(
        skip_all,
        fields(subscription = %self.client.subscription_id(), service = %service.name())
    )]
    pub async fn delete(&self, service: HostedServiceRef<'_>) -> Result<bool> {
        let name = validate_path_segment("service name", service.name())?;
        let request = self.client.request(
            http::Method::DELETE,
            &format!("services/hostedservices/{}", name),
        );

        self.client.execute(request).await.into_deleted()
    }
}
