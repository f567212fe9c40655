//! Common test utilities and helpers

pub mod mock_transport;

use azsm::{Deployment, HostedService};

/// Subscription id used by every test client
#[allow(dead_code)]
pub const SUBSCRIPTION: &str = "sub-0001";

/// A hosted service with every required field set
#[allow(dead_code)]
pub fn sample_service() -> HostedService {
    HostedService::new("my-service")
        .with_label("My Service")
        .with_description("Front end & API")
        .with_location("West US")
}

/// A deployment with every required field set
#[allow(dead_code)]
pub fn sample_deployment() -> Deployment {
    Deployment::new("v1")
        .with_package_url("https://storage.example.com/packages/app.cspkg?sv=1&sig=abc")
        .with_label("Version 1")
        .with_configuration(b"<ServiceConfiguration/>".to_vec())
}

/// Route client logs to the test harness output
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("azsm=debug"))
        .with_test_writer()
        .try_init();
}
