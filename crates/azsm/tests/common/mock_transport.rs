//! Recording transport for policy tests
//!
//! Records every request it is handed and answers from a queue of canned
//! outcomes, so tests can assert both what was sent and how the client
//! interpreted the answer.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use azsm::{
    HttpRequest, HttpResponse, ServiceConfig, ServiceManagementClient, Transport, TransportError,
};

/// Transport spy with queued outcomes.
#[derive(Default)]
pub struct MockTransport {
    requests: Mutex<Vec<HttpRequest>>,
    outcomes: Mutex<VecDeque<azsm_transport::Result<HttpResponse>>>,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a successful response.
    pub fn respond(&self, status: u16, headers: &[(&str, &str)]) {
        let headers = headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, headers, Vec::new())));
    }

    /// Queue a status fault, as the HTTP transport reports non-2xx answers.
    pub fn fail_status(&self, status: u16, message: &str) {
        self.fail(TransportError::Status {
            status,
            message: message.to_string(),
        });
    }

    /// Queue an arbitrary fault.
    pub fn fail(&self, err: TransportError) {
        self.outcomes.lock().unwrap().push_back(Err(err));
    }

    /// Every request performed so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests performed so far.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The only request performed; panics otherwise.
    pub fn single_request(&self) -> HttpRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn perform(&self, request: HttpRequest) -> azsm_transport::Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::new(200, Vec::new(), Vec::new())))
    }
}

/// A client over `transport` for subscription [`super::SUBSCRIPTION`].
#[allow(dead_code)]
pub fn client_with(transport: Arc<MockTransport>) -> ServiceManagementClient {
    super::init_tracing();
    ServiceManagementClient::from_transport(ServiceConfig::new(super::SUBSCRIPTION), transport)
        .expect("client should build")
}
