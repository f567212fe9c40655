//! Configuration for the service management client

use azsm_transport::{ClientIdentity, HttpTransportConfig};
use secrecy::{ExposeSecret, SecretString};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the service management client.
///
/// Everything here is fixed once a client is built; the client never
/// mutates it.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Subscription every request is scoped to
    pub subscription_id: String,

    /// PEM file holding the management certificate
    pub cert_file: Option<PathBuf>,

    /// PEM file holding the private key (defaults to `cert_file`)
    pub key_file: Option<PathBuf>,

    /// In-memory PEM certificate, used instead of `cert_file` when set
    pub cert_pem: Option<String>,

    /// In-memory PEM private key
    pub key_pem: Option<SecretString>,

    /// Management endpoint base URL
    pub management_url: Option<String>,

    /// `x-ms-version` header value
    pub api_version: Option<String>,

    /// Timeout for a whole request (600 s when unset)
    pub timeout: Option<Duration>,

    /// Timeout for establishing a connection (30 s when unset)
    pub connect_timeout: Option<Duration>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            subscription_id: String::new(),
            cert_file: None,
            key_file: None,
            cert_pem: None,
            key_pem: None,
            management_url: None,
            api_version: None,
            timeout: None,
            connect_timeout: None,
        }
    }
}

impl ServiceConfig {
    /// Create a configuration for `subscription_id` with defaults elsewhere.
    pub fn new(subscription_id: impl Into<String>) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            ..Default::default()
        }
    }

    /// Start a fluent builder.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Load configuration from environment variables (and a `.env` file if present).
    ///
    /// This will look for:
    /// - `AZURE_SUBSCRIPTION_ID`
    /// - `AZURE_MANAGEMENT_CERT_FILE` and `AZURE_MANAGEMENT_KEY_FILE`
    /// - `AZURE_MANAGEMENT_URL`
    /// - `AZURE_MANAGEMENT_VERSION`
    /// - `AZURE_MANAGEMENT_TIMEOUT` (seconds)
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self> {
        use std::env;

        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(subscription_id) = env::var("AZURE_SUBSCRIPTION_ID") {
            config.subscription_id = subscription_id;
        }

        if let Ok(cert_file) = env::var("AZURE_MANAGEMENT_CERT_FILE") {
            config.cert_file = Some(PathBuf::from(cert_file));
        }

        if let Ok(key_file) = env::var("AZURE_MANAGEMENT_KEY_FILE") {
            config.key_file = Some(PathBuf::from(key_file));
        }

        if let Ok(management_url) = env::var("AZURE_MANAGEMENT_URL") {
            config.management_url = Some(management_url);
        }

        if let Ok(api_version) = env::var("AZURE_MANAGEMENT_VERSION") {
            config.api_version = Some(api_version);
        }

        if let Ok(timeout_str) = env::var("AZURE_MANAGEMENT_TIMEOUT") {
            let secs = timeout_str.parse::<u64>().map_err(|_| {
                Error::Config(format!(
                    "AZURE_MANAGEMENT_TIMEOUT must be a number of seconds, got '{}'",
                    timeout_str
                ))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Merge this configuration with another, with the other taking precedence.
    pub fn merge(mut self, other: ServiceConfig) -> Self {
        if !other.subscription_id.is_empty() {
            self.subscription_id = other.subscription_id;
        }
        if other.cert_file.is_some() {
            self.cert_file = other.cert_file;
        }
        if other.key_file.is_some() {
            self.key_file = other.key_file;
        }
        if other.cert_pem.is_some() {
            self.cert_pem = other.cert_pem;
        }
        if other.key_pem.is_some() {
            self.key_pem = other.key_pem;
        }
        if other.management_url.is_some() {
            self.management_url = other.management_url;
        }
        if other.api_version.is_some() {
            self.api_version = other.api_version;
        }
        if other.timeout.is_some() {
            self.timeout = other.timeout;
        }
        if other.connect_timeout.is_some() {
            self.connect_timeout = other.connect_timeout;
        }

        self
    }

    /// Resolve the management certificate, if one is configured.
    ///
    /// In-memory PEM wins over files. A key file without a certificate is a
    /// configuration error.
    pub fn identity(&self) -> Result<Option<ClientIdentity>> {
        if let Some(cert_pem) = &self.cert_pem {
            let key_pem = self
                .key_pem
                .as_ref()
                .map(|k| k.expose_secret().to_string())
                .unwrap_or_default();
            return Ok(Some(ClientIdentity::from_pem(cert_pem.clone(), key_pem)));
        }

        match (&self.cert_file, &self.key_file) {
            (Some(cert), key) => {
                let key = key.as_ref().unwrap_or(cert);
                ClientIdentity::from_files(cert, key)
                    .map(Some)
                    .map_err(|e| Error::Config(e.to_string()))
            }
            (None, Some(key)) => Err(Error::Config(format!(
                "key file {} given without a certificate file",
                key.display()
            ))),
            (None, None) => Ok(None),
        }
    }

    /// Request timeout, falling back to the default when unset.
    pub fn timeout_or_default(&self) -> Duration {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT)
    }

    /// Connect timeout, falling back to the default when unset.
    pub fn connect_timeout_or_default(&self) -> Duration {
        self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT)
    }

    /// Transport settings derived from this configuration.
    pub fn transport_config(&self) -> Result<HttpTransportConfig> {
        Ok(HttpTransportConfig {
            timeout: self.timeout_or_default(),
            connect_timeout: self.connect_timeout_or_default(),
            identity: self.identity()?,
            ..Default::default()
        })
    }
}

/// Builder for creating ServiceConfig with a fluent API.
#[derive(Debug, Default)]
pub struct ServiceConfigBuilder {
    config: ServiceConfig,
}

impl ServiceConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the subscription id.
    pub fn subscription_id(mut self, subscription_id: impl Into<String>) -> Self {
        self.config.subscription_id = subscription_id.into();
        self
    }

    /// Set the certificate file.
    pub fn cert_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.cert_file = Some(path.into());
        self
    }

    /// Set the private key file.
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

    /// Build the configuration.
    pub fn build(self) -> ServiceConfig {
        self.config
    }
}
