//! Content API client.
//!
//! Provides a sync HTTP client for the public content endpoints with a
//! lazily fetched CSRF token.

mod details;

pub use details::DetailResult;

use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use crate::envelope::{Collection, Envelope};
use crate::error::{ApiError, DecodeError};
use crate::transport::{MAX_JSON_BODY, RawResponse, Request, Transport, UreqTransport};

/// Header carrying the CSRF token.
const CSRF_HEADER: &str = "CSRF-Token";

/// Path of the CSRF token endpoint.
const CSRF_PATH: &str = "csrf-token";

/// Default PDF download size limit (50 MB).
const DEFAULT_MAX_DOWNLOAD: u64 = 50 * 1024 * 1024;

/// Content API client.
///
/// Each instance fetches a CSRF token once, before its first request. The
/// outcome is cached for the life of the instance, including a failed
/// fetch; requests then go out without the header.
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    csrf_token: OnceLock<Option<String>>,
    max_download_bytes: u64,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("max_download_bytes", &self.max_download_bytes)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client talking HTTP to `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self::with_transport(base_url, Arc::new(UreqTransport::new(timeout)))
    }

    /// Create a client over an explicit transport.
    pub fn with_transport(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_owned(),
            csrf_token: OnceLock::new(),
            max_download_bytes: DEFAULT_MAX_DOWNLOAD,
        }
    }

    /// Set the largest PDF accepted by [`ApiClient::download_pdf`].
    #[must_use]
    pub fn with_max_download_bytes(mut self, max: u64) -> Self {
        self.max_download_bytes = max;
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` and parse the body as JSON.
    ///
    /// Single attempt. Non-2xx statuses are errors.
    pub fn get(&self, path: &str) -> Result<Value, ApiError> {
        let response = self.send(path, MAX_JSON_BODY)?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// GET `public/<endpoint>`, never failing.
    ///
    /// Errors are logged and replaced by the failure object
    /// `{"success": false, "message": ..., "<endpoint>": []}`.
    pub fn fetch_public(&self, endpoint: &str) -> Value {
        let endpoint = endpoint.trim_matches('/');
        match self.get(&format!("public/{endpoint}")) {
            Ok(value) => value,
            Err(e) => {
                error!(endpoint, error = %e, "Failed to fetch public content");
                failure_envelope(endpoint, &e.to_string())
            }
        }
    }

    /// Fetch and decode a collection.
    ///
    /// Transport and HTTP failures arrive as a failed envelope; only
    /// malformed payloads are errors.
    pub fn fetch_collection<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Envelope<T>, DecodeError> {
        Envelope::decode(self.fetch_public(collection.endpoint()), collection.key())
    }

    /// The cached CSRF token, fetching it on first use.
    fn csrf_token(&self) -> Option<&str> {
        self.csrf_token
            .get_or_init(|| self.fetch_csrf_token())
            .as_deref()
    }

    fn fetch_csrf_token(&self) -> Option<String> {
        let request = Request {
            base_url: &self.base_url,
            path: CSRF_PATH,
            headers: Vec::new(),
            max_body_bytes: MAX_JSON_BODY,
        };

        let result = self
            .transport
            .get(&request)
            .and_then(ensure_success)
            .and_then(|response| Ok(serde_json::from_slice::<Value>(&response.body)?));

        match result {
            Ok(value) => {
                let token = value
                    .get("csrfToken")
                    .and_then(Value::as_str)
                    .filter(|t| !t.is_empty())
                    .map(str::to_owned);
                if token.is_none() {
                    warn!("CSRF token response has no csrfToken, continuing without it");
                }
                token
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch CSRF token, continuing without it");
                None
            }
        }
    }

    /// Send a GET request with the CSRF header attached when available.
    fn send(&self, path: &str, max_body_bytes: u64) -> Result<RawResponse, ApiError> {
        let path = path.trim_start_matches('/');
        let mut headers = Vec::new();
        if let Some(token) = self.csrf_token() {
            headers.push((CSRF_HEADER, token.to_owned()));
        }

        debug!(path, "GET");

        let request = Request {
            base_url: &self.base_url,
            path,
            headers,
            max_body_bytes,
        };
        self.transport.get(&request).and_then(ensure_success)
    }
}

/// Turn non-2xx responses into [`ApiError::HttpResponse`].
fn ensure_success(response: RawResponse) -> Result<RawResponse, ApiError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ApiError::HttpResponse {
            status: response.status,
            body: response.text(),
        })
    }
}

/// Build the failure object returned by [`ApiClient::fetch_public`].
pub fn failure_envelope(endpoint: &str, message: &str) -> Value {
    let mut object = Map::new();
    object.insert("success".to_owned(), Value::Bool(false));
    object.insert("message".to_owned(), Value::String(message.to_owned()));
    object.insert(endpoint.to_owned(), Value::Array(Vec::new()));
    Value::Object(object)
}
