//! Error types for the content API.

/// Error from a single HTTP exchange.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Network or protocol failure before a status was received.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Server answered with a non-2xx status.
    #[error("HTTP error: {status} - {body}")]
    HttpResponse { status: u16, body: String },

    /// Response body is not valid JSON.
    #[error("JSON error: {0}")]
    Json(String),
}

impl ApiError {
    /// HTTP status code, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpResponse { status, .. } => Some(*status),
            Self::Transport(_) | Self::Json(_) => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Json(e.to_string())
    }
}

impl From<ureq::Error> for ApiError {
    fn from(e: ureq::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}

/// A successful response whose payload does not match the expected shape.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Top-level payload is not a JSON object.
    #[error("expected a JSON object, got {found}")]
    NotAnObject { found: &'static str },

    /// `success: true` without the collection key.
    #[error("missing '{key}' in successful response")]
    MissingKey { key: String },

    /// Collection key present but not an array.
    #[error("'{key}' is not an array")]
    NotAnArray { key: String },

    /// A collection item failed to decode.
    #[error("invalid item {index} in '{key}': {source}")]
    Item {
        key: String,
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A detail record failed to decode.
    #[error("invalid '{key}': {source}")]
    Record {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Error parsing the JSON document embedded in a page template.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Template has no content for any language.
    #[error("page has no template content")]
    Empty,

    /// Embedded content is not valid template JSON.
    #[error("invalid template JSON: {0}")]
    Json(#[from] serde_json::Error),
}
