//! HTTP transport seam.
//!
//! [`ApiClient`](crate::ApiClient) builds [`Request`]s and hands them to a
//! [`Transport`]. Production code uses [`UreqTransport`]; tests use
//! [`MockTransport`](crate::MockTransport).

use std::time::Duration;

use ureq::Agent;

use crate::error::ApiError;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Body size cap for JSON responses.
pub(crate) const MAX_JSON_BODY: u64 = 10 * 1024 * 1024;

/// A GET request against the content API.
#[derive(Debug, Clone)]
pub struct Request<'a> {
    /// API base URL without trailing slash.
    pub base_url: &'a str,
    /// Path relative to the base URL, without leading slash.
    pub path: &'a str,
    /// Extra request headers.
    pub headers: Vec<(&'static str, String)>,
    /// Largest accepted response body, in bytes.
    pub max_body_bytes: u64,
}

impl Request<'_> {
    /// Absolute request URL.
    pub fn url(&self) -> String {
        format!("{}/{}", self.base_url, self.path)
    }

    /// Value of a request header, if set.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status and body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Performs HTTP GET requests.
///
/// Implementations return `Ok` for every response that carries a status,
/// including 4xx/5xx, and `Err` only for transport-level failures.
pub trait Transport: Send + Sync {
    /// Perform a single GET request. No retries.
    fn get(&self, request: &Request<'_>) -> Result<RawResponse, ApiError>;
}

/// Blocking transport backed by a shared `ureq` agent.
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    /// Create a transport with the given global timeout.
    pub fn new(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT))
    }
}

impl Transport for UreqTransport {
    fn get(&self, request: &Request<'_>) -> Result<RawResponse, ApiError> {
        let url = request.url();

        let mut builder = self.agent.get(&url).header("Accept", "application/json");
        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }

        let response = builder.call()?;
        let status = response.status().as_u16();
        let mut body = response.into_body();
        let body = body
            .with_config()
            .limit(request.max_body_bytes)
            .read_to_vec()?;

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_url_joins_base_and_path() {
        let request = Request {
            base_url: "http://cms.test/api",
            path: "public/posts",
            headers: Vec::new(),
            max_body_bytes: MAX_JSON_BODY,
        };
        assert_eq!(request.url(), "http://cms.test/api/public/posts");
    }

    #[test]
    fn test_request_header_lookup_is_case_insensitive() {
        let request = Request {
            base_url: "http://cms.test/api",
            path: "public/posts",
            headers: vec![("CSRF-Token", "abc".to_owned())],
            max_body_bytes: MAX_JSON_BODY,
        };
        assert_eq!(request.header("csrf-token"), Some("abc"));
        assert_eq!(request.header("Authorization"), None);
    }

    #[test]
    fn test_raw_response_success_range() {
        let ok = RawResponse {
            status: 204,
            body: Vec::new(),
        };
        let redirect = RawResponse {
            status: 301,
            body: Vec::new(),
        };
        assert!(ok.is_success());
        assert!(!redirect.is_success());
    }

    #[test]
    fn test_raw_response_text_is_lossy() {
        let response = RawResponse {
            status: 500,
            body: vec![b'o', b'k', 0xff],
        };
        assert_eq!(response.text(), "ok\u{fffd}");
    }

    static_assertions::assert_impl_all!(UreqTransport: Transport);
}
