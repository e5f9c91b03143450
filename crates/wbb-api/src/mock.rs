//! Mock transport implementation for testing.
//!
//! Provides [`MockTransport`] for unit testing without network access.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use crate::error::ApiError;
use crate::transport::{RawResponse, Request, Transport};

#[derive(Debug, Clone)]
enum MockReply {
    Response(RawResponse),
    Error(String),
}

/// A request as seen by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Path relative to the base URL.
    pub path: String,
    /// Headers sent with the request.
    pub headers: Vec<(String, String)>,
}

/// Mock transport for testing.
///
/// Replies are keyed by request path (relative to the client's base URL).
/// Unknown paths answer 404. Every request is recorded so tests can count
/// round trips and inspect headers.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use serde_json::json;
/// use wbb_api::{ApiClient, MockTransport};
///
/// let transport = Arc::new(
///     MockTransport::new().with_json("public/posts", json!({"success": true, "posts": []})),
/// );
/// let client = ApiClient::with_transport("http://cms.test/api", transport.clone());
/// let value = client.fetch_public("posts");
/// assert_eq!(transport.calls("public/posts"), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: RwLock<HashMap<String, MockReply>>,
    requests: RwLock<Vec<RecordedRequest>>,
}

impl MockTransport {
    /// Create a mock that answers 404 to everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `path` with 200 and the given JSON body.
    #[must_use]
    pub fn with_json(self, path: &str, body: Value) -> Self {
        self.set_json(path, body);
        self
    }

    /// Answer `path` with the given status and raw body.
    #[must_use]
    pub fn with_status(self, path: &str, status: u16, body: &str) -> Self {
        self.set_reply(
            path,
            MockReply::Response(RawResponse {
                status,
                body: body.as_bytes().to_vec(),
            }),
        );
        self
    }

    /// Answer `path` with 200 and the given bytes.
    #[must_use]
    pub fn with_bytes(self, path: &str, body: Vec<u8>) -> Self {
        self.set_reply(path, MockReply::Response(RawResponse { status: 200, body }));
        self
    }

    /// Fail requests to `path` with a transport error.
    #[must_use]
    pub fn with_error(self, path: &str, message: &str) -> Self {
        self.set_error(path, message);
        self
    }

    /// Replace the reply for `path` with 200 and the given JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_json(&self, path: &str, body: Value) {
        self.set_reply(
            path,
            MockReply::Response(RawResponse {
                status: 200,
                body: body.to_string().into_bytes(),
            }),
        );
    }

    /// Replace the reply for `path` with a transport error.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_error(&self, path: &str, message: &str) {
        self.set_reply(path, MockReply::Error(message.to_owned()));
    }

    fn set_reply(&self, path: &str, reply: MockReply) {
        self.replies
            .write()
            .unwrap()
            .insert(path.to_owned(), reply);
    }

    /// Number of requests made to `path`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn calls(&self, path: &str) -> usize {
        self.requests
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .count()
    }

    /// Number of requests made to any path.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn total_calls(&self) -> usize {
        self.requests.read().unwrap().len()
    }

    /// All recorded requests, in arrival order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().unwrap().clone()
    }
}

impl Transport for MockTransport {
    fn get(&self, request: &Request<'_>) -> Result<RawResponse, ApiError> {
        self.requests.write().unwrap().push(RecordedRequest {
            path: request.path.to_owned(),
            headers: request
                .headers
                .iter()
                .map(|(k, v)| ((*k).to_owned(), v.clone()))
                .collect(),
        });

        let reply = self.replies.read().unwrap().get(request.path).cloned();
        match reply {
            Some(MockReply::Response(response)) => {
                if response.body.len() as u64 > request.max_body_bytes {
                    return Err(ApiError::Transport(format!(
                        "body exceeds limit of {} bytes",
                        request.max_body_bytes
                    )));
                }
                Ok(response)
            }
            Some(MockReply::Error(message)) => Err(ApiError::Transport(message)),
            None => Ok(RawResponse {
                status: 404,
                body: b"Not Found".to_vec(),
            }),
        }
    }
}
