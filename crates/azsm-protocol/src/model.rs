//! Resources managed through the service management API
//!
//! These are plain data holders. Nothing is validated on construction; the
//! encoder and the client check required fields right before a request is
//! built.

use crate::error::ProtocolError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered `(name, value)` pairs attached to a resource.
///
/// Duplicate names are kept as-is.
pub type ExtendedProperties = Vec<(String, String)>;

/// A named compute container holding at most one production and one staging
/// deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedService {
    /// Unique service name, also the DNS prefix of the service
    pub name: String,

    /// Display label, base64-encoded on the wire
    pub label: String,

    /// Free-text description
    pub description: String,

    /// Datacenter region, e.g. `West US`
    pub location: String,

    /// Optional affinity group the service belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affinity_group: Option<String>,

    /// Extended properties in insertion order
    #[serde(default)]
    pub extended_properties: ExtendedProperties,
}

impl HostedService {
    /// Create a hosted service with only its name set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Set the affinity group.
    pub fn with_affinity_group(mut self, affinity_group: impl Into<String>) -> Self {
        self.affinity_group = Some(affinity_group.into());
        self
    }

    /// Append an extended property.
    pub fn add_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.extended_properties.push((name.into(), value.into()));
    }
}

/// A versioned package and its configuration running in a deployment slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    /// Deployment name
    pub name: String,

    /// URL of the service package in blob storage
    pub package_url: String,

    /// Display label, base64-encoded on the wire
    pub label: String,

    /// Service configuration document, base64-encoded on the wire
    pub configuration: Vec<u8>,

    /// Start the deployment right after it is created
    pub start_deployment: bool,

    /// Fail the deployment on package validation warnings
    pub treat_warnings_as_errors: bool,

    /// Extended properties in insertion order
    #[serde(default)]
    pub extended_properties: ExtendedProperties,
}

impl Default for Deployment {
    fn default() -> Self {
        Self {
            name: String::new(),
            package_url: String::new(),
            label: String::new(),
            configuration: Vec::new(),
            start_deployment: true,
            treat_warnings_as_errors: true,
            extended_properties: Vec::new(),
        }
    }
}

impl Deployment {
    /// Create a deployment with only its name set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the package URL.
    pub fn with_package_url(mut self, package_url: impl Into<String>) -> Self {
        self.package_url = package_url.into();
        self
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the configuration blob.
    pub fn with_configuration(mut self, configuration: impl Into<Vec<u8>>) -> Self {
        self.configuration = configuration.into();
        self
    }

    /// Set whether the deployment starts immediately.
    pub fn with_start_deployment(mut self, start: bool) -> Self {
        self.start_deployment = start;
        self
    }

    /// Set whether warnings fail the deployment.
    pub fn with_treat_warnings_as_errors(mut self, treat: bool) -> Self {
        self.treat_warnings_as_errors = treat;
        self
    }

    /// Append an extended property.
    pub fn add_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.extended_properties.push((name.into(), value.into()));
    }
}

/// One of the two deployment environments of a hosted service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentSlot {
    /// Live slot
    Production,
    /// Pre-production slot
    #[default]
    Staging,
}

impl DeploymentSlot {
    /// Path segment used in request URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Staging => "staging",
        }
    }
}

impl fmt::Display for DeploymentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeploymentSlot {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            _ => Err(ProtocolError::InvalidSlot(s.to_string())),
        }
    }
}
