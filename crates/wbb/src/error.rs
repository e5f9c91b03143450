//! CLI error types.

use wbb_api::ApiError;
use wbb_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Content(String),
}
