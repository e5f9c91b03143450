//! Single-record endpoints: page and post details, PDF downloads.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

use super::ApiClient;
use crate::envelope::{decode_record, json_kind};
use crate::error::{ApiError, DecodeError};
use crate::slug::normalize_slug;
use crate::types::{Id, Page, Post};

/// Characters left unescaped in a path segment: A-Z a-z 0-9 - _ . ! ~ * ' ( )
const SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a single path segment.
fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT_ENCODE_SET).to_string()
}

/// Outcome of a detail request.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailResult<T> {
    /// The record was returned.
    Found(T),
    /// HTTP 404 or `success: false`.
    NotFound(String),
    /// Transport failure, other HTTP error, or malformed payload.
    Failed(String),
}

impl<T> DetailResult<T> {
    /// The record, if found.
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound(_) | Self::Failed(_) => None,
        }
    }

    /// Map the found record.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DetailResult<U> {
        match self {
            Self::Found(value) => DetailResult::Found(f(value)),
            Self::NotFound(message) => DetailResult::NotFound(message),
            Self::Failed(message) => DetailResult::Failed(message),
        }
    }
}

impl ApiClient {
    /// Fetch a page by slug from `public/pages/:slug`.
    pub fn fetch_page(&self, slug: &str) -> DetailResult<Page> {
        self.fetch_detail("pages", slug, "page", "Page not found")
    }

    /// Fetch a post by slug from `public/posts/:slug`.
    pub fn fetch_post(&self, slug: &str) -> DetailResult<Post> {
        self.fetch_detail("posts", slug, "post", "Post not found")
    }

    /// Download a PDF attachment from `public/download/pdf/:id`.
    ///
    /// The body is capped at the client's download limit.
    pub fn download_pdf(&self, id: &Id) -> Result<Vec<u8>, ApiError> {
        let path = format!("public/download/pdf/{}", encode_segment(id.as_str()));
        info!(id = %id, "Downloading PDF");
        let response = self.send(&path, self.max_download_bytes)?;
        info!(id = %id, bytes = response.body.len(), "Downloaded PDF");
        Ok(response.body)
    }

    fn fetch_detail<T: DeserializeOwned>(
        &self,
        resource: &str,
        slug: &str,
        key: &str,
        not_found: &str,
    ) -> DetailResult<T> {
        let slug = normalize_slug(slug);
        if slug.is_empty() {
            return DetailResult::NotFound(not_found.to_owned());
        }

        let path = format!("public/{resource}/{}", encode_segment(slug));
        let value = match self.get(&path) {
            Ok(value) => value,
            Err(ApiError::HttpResponse { status: 404, .. }) => {
                return DetailResult::NotFound(not_found.to_owned());
            }
            Err(e) => return DetailResult::Failed(e.to_string()),
        };

        match decode_detail(value, key) {
            Ok(Some(record)) => DetailResult::Found(record),
            Ok(None) => DetailResult::NotFound(not_found.to_owned()),
            Err(e) => DetailResult::Failed(e.to_string()),
        }
    }
}

/// Decode `{success, <key>: {...}}`; `Ok(None)` when `success` is false.
fn decode_detail<T: DeserializeOwned>(value: Value, key: &str) -> Result<Option<T>, DecodeError> {
    let object = match value {
        Value::Object(object) => object,
        other => {
            return Err(DecodeError::NotAnObject {
                found: json_kind(&other),
            });
        }
    };
    if !object
        .get("success")
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        return Ok(None);
    }
    decode_record(object, key).map(Some)
}
