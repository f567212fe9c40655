//! Transient request value
//!
//! A [`ServiceRequest`] describes exactly one HTTP exchange. It is built
//! fresh for every operation and handed to a transport once.

use crate::headers::build_headers;
use http::Method;

/// One service management HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRequest {
    /// HTTP verb
    pub method: Method,

    /// Management host, e.g. `management.core.windows.net`
    pub host: String,

    /// Absolute request path starting with `/`
    pub path: String,

    /// Headers in send order; duplicates are kept
    pub headers: Vec<(String, String)>,

    /// Request body, possibly empty
    pub body: Vec<u8>,
}

impl ServiceRequest {
    /// Create a request with no headers and an empty body.
    pub fn new(method: Method, host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method,
            host: host.into(),
            path: path.into(),
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Set the body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Append a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Apply the protocol header rules for `version` to this request.
    ///
    /// Call this after the body is final so `Content-Length` matches it.
    pub fn with_protocol_headers(mut self, version: &str) -> Self {
        let headers = std::mem::take(&mut self.headers);
        self.headers = build_headers(&self.method, self.body.len(), headers, version);
        self
    }

    /// Value of the first header named `name`, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
