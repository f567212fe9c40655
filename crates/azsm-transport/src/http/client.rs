//! HTTP transport client implementation
//!
//! Implements the Transport trait over reqwest with rustls and an optional
//! client certificate. There is no retry loop here: every call is exactly
//! one exchange.

use crate::error::{Result, TransportError};
use crate::http::identity::ClientIdentity;
use crate::traits::{HttpRequest, HttpResponse, Transport};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP transport implementation
///
/// Handles HTTP requests with:
/// - Client-certificate authentication
/// - Connection pooling
/// - Timeout handling
#[derive(Clone)]
pub struct HttpTransport {
    client: Arc<ReqwestClient>,
    timeout: Duration,
}

impl HttpTransport {
    /// Create a new HTTP transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(Default::default())
    }

    /// Create a new HTTP transport with custom configuration
    pub fn with_config(config: HttpTransportConfig) -> Result<Self> {
        let mut builder = ReqwestClient::builder()
            .use_rustls_tls()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(config.user_agent.clone());

        if let Some(identity) = &config.identity {
            builder = builder.identity(identity.to_reqwest()?);
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        Ok(Self {
            client: Arc::new(client),
            timeout: config.timeout,
        })
    }

    /// Get the configured request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = reqwest::Method::from_bytes(request.method.to_uppercase().as_bytes())
            .map_err(|_| {
                TransportError::Http(format!("Unsupported HTTP method: {}", request.method))
            })?;

        let mut req = self.client.request(method, &request.url);

        for (key, value) in &request.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if let Some(body) = request.body {
            req = req.body(body);
        }

        let response = req.send().await?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
            .collect();
        let body = response.bytes().await?.to_vec();

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body).trim().to_string();
            let message = if text.is_empty() {
                status.canonical_reason().unwrap_or("Unknown").to_string()
            } else {
                text
            };
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(HttpResponse::new(status.as_u16(), headers, body))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn perform(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = request.method.clone();
        let url = request.url.clone();
        debug!(%method, %url, body_size = request.body_len(), "Sending HTTP request");

        let result = self.send(request).await;
        match &result {
            Ok(response) => debug!(%method, %url, status = response.status, "HTTP request succeeded"),
            Err(e) => warn!(%method, %url, error = %e, "HTTP request failed"),
        }
        result
    }
}

/// HTTP transport configuration
#[derive(Clone, Debug)]
pub struct HttpTransportConfig {
    /// Request timeout
    pub timeout: Duration,

    /// Connection timeout
    pub connect_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// User-Agent header value
    pub user_agent: String,

    /// Management certificate presented to the server
    pub identity: Option<ClientIdentity>,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(600),
            connect_timeout: Duration::from_secs(30),
            pool_max_idle_per_host: 10,
            user_agent: format!("azsm-rust/{}", env!("CARGO_PKG_VERSION")),
            identity: None,
        }
    }
}
