//! Header rules shared by every service management request
//!
//! Checks run in a fixed order (version, then content length, then content
//! type) and each one appends, so the resulting sequence is deterministic.

use http::Method;

/// Name of the protocol version header.
pub const VERSION_HEADER: &str = "x-ms-version";

/// Content type used when the caller did not set one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/xml";

/// Verbs that carry a `Content-Length` header.
const LENGTH_VERBS: &[&str] = &["PUT", "POST", "MERGE", "DELETE"];

/// Verbs that never carry a `Content-Type` header.
const BODYLESS_VERBS: &[&str] = &["GET", "HEAD"];

/// Append the protocol headers to `headers` and return the full sequence.
///
/// - `x-ms-version: {version}` is always appended.
/// - `Content-Length: {body_len}` is appended for PUT, POST, MERGE and DELETE.
/// - `Content-Type: application/xml` is appended for any verb other than GET
///   and HEAD, unless a content type is already present (names compare
///   case-insensitively).
///
/// Existing entries are never removed or reordered.
///
/// # Example
///
/// ```
/// use azsm_protocol::build_headers;
/// use http::Method;
///
/// let headers = build_headers(&Method::POST, 12, Vec::new(), "2010-10-28");
/// assert_eq!(headers[0], ("x-ms-version".to_string(), "2010-10-28".to_string()));
/// assert_eq!(headers[1], ("Content-Length".to_string(), "12".to_string()));
/// assert_eq!(headers[2], ("Content-Type".to_string(), "application/xml".to_string()));
/// ```
pub fn build_headers(
    method: &Method,
    body_len: usize,
    mut headers: Vec<(String, String)>,
    version: &str,
) -> Vec<(String, String)> {
    let verb = method.as_str();

    headers.push((VERSION_HEADER.to_string(), version.to_string()));

    if LENGTH_VERBS.contains(&verb) {
        headers.push(("Content-Length".to_string(), body_len.to_string()));
    }

    if !BODYLESS_VERBS.contains(&verb) && !has_header(&headers, "content-type") {
        headers.push(("Content-Type".to_string(), DEFAULT_CONTENT_TYPE.to_string()));
    }

    headers
}

/// `true` when `headers` contains `name`, ignoring ASCII case.
pub fn has_header(headers: &[(String, String)], name: &str) -> bool {
    headers.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
}

/// The `MERGE` verb, which `http` only knows as an extension method.
pub fn merge_method() -> Method {
    // "MERGE" is a valid token, so this never fails.
    Method::from_bytes(b"MERGE").unwrap_or(Method::PATCH)
}
