//! Main client implementation for the service management API

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use azsm_protocol::{Deployment, DeploymentSlot, HostedService, ServiceRequest, X_MS_VERSION};
use azsm_transport::{HttpRequest, HttpResponse, HttpTransport, Transport, TransportError};

use crate::{
    DEFAULT_MANAGEMENT_URL,
    config::ServiceConfig,
    error::{Error, Result},
    observability::{RequestMetadata, RequestTimer, ResponseMetadata},
    resources::{
        DeploymentTarget, Deployments, HostedServiceRef, HostedServices, validate_path_segment,
    },
    translate::classify_fault,
};

/// Client for the service management API.
///
/// Cloning is cheap; clones share the same transport and configuration.
///
/// # Example
///
/// ```rust,no_run
/// use azsm::{HostedService, ServiceManagementClient};
///
/// # async fn example() -> azsm::Result<()> {
/// let client = ServiceManagementClient::builder()
///     .subscription_id("my-subscription")
///     .cert_file("/etc/azure/management.pem")
///     .build()?;
///
/// let service = HostedService::new("my-service")
///     .with_label("My Service")
///     .with_location("West US");
///
/// let created = client.create_hosted_service(&service).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ServiceManagementClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    subscription_id: String,
    management_url: Url,
    api_version: String,
    transport: Arc<dyn Transport>,
}

impl ServiceManagementClient {
    /// Create a new client builder.
    pub fn builder() -> ServiceManagementClientBuilder {
        ServiceManagementClientBuilder::default()
    }

    /// Create a client from a configuration object.
    ///
    /// Builds an [`HttpTransport`] presenting the configured management
    /// certificate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the certificate material cannot be loaded
    /// or the management URL is invalid, and [`Error::Validation`] if the
    /// subscription id is empty.
    pub fn from_config(config: ServiceConfig) -> Result<Self> {
        let transport_config = config.transport_config()?;
        let transport = HttpTransport::with_config(transport_config)
            .map_err(|e| Error::Config(e.to_string()))?;

        Self::from_transport(config, Arc::new(transport))
    }

    /// Create a client over a caller-supplied transport.
    ///
    /// Certificate settings in `config` are ignored; authentication is the
    /// transport's business.
    pub fn from_transport(config: ServiceConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        validate_path_segment("subscription id", &config.subscription_id)?;

        let raw_url = config
            .management_url
            .as_deref()
            .unwrap_or(DEFAULT_MANAGEMENT_URL);
        let management_url = Url::parse(raw_url)
            .map_err(|e| Error::Config(format!("invalid management URL '{}': {}", raw_url, e)))?;
        if !matches!(management_url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "management URL must be http or https, got '{}'",
                raw_url
            )));
        }

        Ok(Self {
            inner: Arc::new(ClientInner {
                subscription_id: config.subscription_id,
                management_url,
                api_version: config.api_version.unwrap_or_else(|| X_MS_VERSION.to_string()),
                transport,
            }),
        })
    }

    /// Access hosted service operations.
    pub fn hosted_services(&self) -> HostedServices {
        HostedServices::new(self.clone())
    }

    /// Access deployment operations.
    pub fn deployments(&self) -> Deployments {
        Deployments::new(self.clone())
    }

    /// Create a hosted service.
    ///
    /// Returns `false` when a hosted service with that name already exists.
    pub async fn create_hosted_service(&self, service: &HostedService) -> Result<bool> {
        self.hosted_services().create(service).await
    }

    /// Delete a hosted service, given either the service or its name.
    ///
    /// Returns `false` when the hosted service does not exist.
    pub async fn delete_hosted_service<'a>(
        &self,
        service: impl Into<HostedServiceRef<'a>>,
    ) -> Result<bool> {
        self.hosted_services().delete(service.into()).await
    }

    /// Create a deployment in `slot` of `service_name`.
    ///
    /// Returns the request id of the asynchronous operation.
    pub async fn create_deployment(
        &self,
        deployment: &Deployment,
        service_name: &str,
        slot: DeploymentSlot,
    ) -> Result<String> {
        self.deployments()
            .create(deployment, service_name, slot)
            .await
    }

    /// Delete a deployment by slot or by name.
    ///
    /// Returns the request id of the asynchronous operation.
    pub async fn delete_deployment(
        &self,
        service_name: &str,
        target: impl Into<DeploymentTarget>,
    ) -> Result<String> {
        self.deployments().delete(service_name, target.into()).await
    }

    /// Subscription every request is scoped to.
    pub fn subscription_id(&self) -> &str {
        &self.inner.subscription_id
    }

    /// Management endpoint base URL.
    pub fn management_url(&self) -> &Url {
        &self.inner.management_url
    }

    /// `x-ms-version` sent with every request.
    pub fn api_version(&self) -> &str {
        &self.inner.api_version
    }

    /// Start a request for `suffix` under the subscription root.
    pub(crate) fn request(&self, method: http::Method, suffix: &str) -> ServiceRequest {
        let path = format!("/{}/{}", self.inner.subscription_id, suffix);
        let host = self.inner.management_url.host_str().unwrap_or_default();
        ServiceRequest::new(method, host, path)
    }

    /// Send `request` and translate any fault.
    ///
    /// Protocol headers are applied here, after the body is final.
    pub(crate) async fn execute(&self, request: ServiceRequest) -> Result<HttpResponse> {
        let ServiceRequest {
            method,
            path,
            headers,
            body,
            ..
        } = request.with_protocol_headers(&self.inner.api_version);

        let meta = RequestMetadata::new(method.as_str(), &path).with_body_size(body.len());
        meta.log_request();

        let url = format!(
            "{}{}",
            self.inner.management_url.as_str().trim_end_matches('/'),
            path
        );
        let mut http_request = HttpRequest::new(method.as_str(), url).with_headers(headers);
        if !body.is_empty() {
            http_request = http_request.with_body(body);
        }

        let timer = RequestTimer::start();
        let result = self
            .inner
            .transport
            .perform(http_request)
            .await
            .and_then(reject_failure_status);

        match result {
            Ok(response) => {
                ResponseMetadata::new(Some(response.status), timer.elapsed()).log_success(&meta);
                Ok(response)
            }
            Err(err) => {
                ResponseMetadata::new(err.status(), timer.elapsed())
                    .log_error(&meta, &err.to_string());
                Err(classify_fault(err))
            }
        }
    }
}

/// Treat a non-2xx response from a lenient transport as a status fault.
fn reject_failure_status(response: HttpResponse) -> azsm_transport::Result<HttpResponse> {
    if response.is_success() {
        return Ok(response);
    }

    let text = String::from_utf8_lossy(&response.body).trim().to_string();
    let message = if text.is_empty() {
        http::StatusCode::from_u16(response.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown")
            .to_string()
    } else {
        text
    };

    Err(TransportError::Status {
        status: response.status,
        message,
    })
}

impl std::fmt::Debug for ServiceManagementClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceManagementClient")
            .field("subscription_id", &self.inner.subscription_id)
            .field("management_url", &self.inner.management_url.as_str())
            .field("api_version", &self.inner.api_version)
            .finish_non_exhaustive()
    }
}

/// Builder for creating a configured ServiceManagementClient.
#[derive(Default)]
pub struct ServiceManagementClientBuilder {
    config: ServiceConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl ServiceManagementClientBuilder {
    /// Set the subscription id.
    pub fn subscription_id(mut self, subscription_id: impl Into<String>) -> Self {
        self.config.subscription_id = subscription_id.into();
        self
    }

    /// Set the management certificate file.
    pub fn cert_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.cert_file = Some(path.into());
        self
    }

    /// Set the private key file, when it is not inside the certificate file.
    pub fn key_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.key_file = Some(path.into());
        self
    }

    /// Use in-memory PEM certificate and key.
    pub fn identity_pem(mut self, cert_pem: impl Into<String>, key_pem: impl Into<String>) -> Self {
        self.config.cert_pem = Some(cert_pem.into());
        self.config.key_pem = Some(SecretString::new(key_pem.into().into_boxed_str()));
        self
    }

    /// Set the management endpoint base URL.
    pub fn management_url(mut self, url: impl Into<String>) -> Self {
        self.config.management_url = Some(url.into());
        self
    }

    /// Set the `x-ms-version` header value.
    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.config.api_version = Some(api_version.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    /// Send requests through `transport` instead of the default HTTP client.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client with the configured options.
    pub fn build(self) -> Result<ServiceManagementClient> {
        match self.transport {
            Some(transport) => ServiceManagementClient::from_transport(self.config, transport),
            None => ServiceManagementClient::from_config(self.config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = ServiceManagementClient::builder()
            .subscription_id("sub-1")
            .management_url("https://example.com")
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap();

        assert_eq!(client.subscription_id(), "sub-1");
        assert_eq!(client.management_url().as_str(), "https://example.com/");
        assert_eq!(client.api_version(), "2010-10-28");
    }

    #[test]
    fn test_default_management_url() {
        let client = ServiceManagementClient::builder()
            .subscription_id("sub-1")
            .build()
            .unwrap();
        assert_eq!(
            client.management_url().host_str(),
            Some("management.core.windows.net")
        );
    }

    #[test]
    fn test_empty_subscription_is_rejected() {
        let err = ServiceManagementClient::builder().build().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_invalid_management_url() {
        let err = ServiceManagementClient::builder()
            .subscription_id("sub")
            .management_url("not a url")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = ServiceManagementClient::builder()
            .subscription_id("sub")
            .management_url("ftp://example.com")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_unreadable_certificate_is_config_error() {
        let err = ServiceManagementClient::builder()
            .subscription_id("sub")
            .cert_file("/nonexistent/management.pem")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_request_paths() {
        let client = ServiceManagementClient::builder()
            .subscription_id("sub-1")
            .build()
            .unwrap();
        let request = client.request(http::Method::DELETE, "services/hostedservices/svc");

        assert_eq!(request.path, "/sub-1/services/hostedservices/svc");
        assert_eq!(request.host, "management.core.windows.net");
    }

    #[test]
    fn test_reject_failure_status() {
        let ok = HttpResponse::new(202, Vec::new(), Vec::new());
        assert!(reject_failure_status(ok).is_ok());

        let err = reject_failure_status(HttpResponse::new(409, Vec::new(), Vec::new())).unwrap_err();
        match err {
            TransportError::Status { status, message } => {
                assert_eq!(status, 409);
                assert_eq!(message, "Conflict");
            }
            other => panic!("Expected Status fault, got {:?}", other),
        }
    }

    #[test]
    fn test_client_clone_and_debug() {
        let client = ServiceManagementClient::builder()
            .subscription_id("sub-1")
            .build()
            .unwrap();
        let clone = client.clone();
        assert_eq!(clone.subscription_id(), client.subscription_id());
        assert!(format!("{:?}", client).contains("sub-1"));
    }
}
