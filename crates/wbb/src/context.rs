//! Shared setup for commands: configuration, session, and content loader.

use std::sync::Arc;

use wbb_api::ApiClient;
use wbb_config::{CliSettings, Config};
use wbb_content::{ContentLoader, ContentLoaderConfig};
use wbb_lang::LanguageStore;
use wbb_session::{FileSession, MemorySession, SessionStorage};

use crate::GlobalArgs;
use crate::error::CliError;

/// Load configuration with the global CLI overrides applied.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config, CliError> {
    let cli_settings = CliSettings {
        api_url: global.api_url.clone(),
        ..Default::default()
    };
    Ok(Config::load(global.config.as_deref(), Some(&cli_settings))?)
}

/// Open the session configured in `config`.
pub(crate) fn open_session(config: &Config, version: &str) -> Arc<dyn SessionStorage> {
    match &config.session_resolved.dir {
        Some(dir) => {
            tracing::debug!(dir = %dir.display(), "Using file session");
            Arc::new(FileSession::new(dir.clone(), version))
        }
        None => Arc::new(MemorySession::new()),
    }
}

/// Everything a content command needs.
pub(crate) struct SiteContext {
    pub loader: ContentLoader,
    pub language: LanguageStore,
}

impl SiteContext {
    /// Load config, then build the language store and content loader.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or no API URL is configured.
    pub(crate) fn open(global: &GlobalArgs, version: &str) -> Result<Self, CliError> {
        let config = load_config(global)?;
        Self::from_config(&config, version)
    }

    pub(crate) fn from_config(config: &Config, version: &str) -> Result<Self, CliError> {
        let api_url = config.require_api_url()?;
        let client = ApiClient::new(api_url, config.api.timeout())
            .with_max_download_bytes(config.api.max_download_bytes());
        let loader = ContentLoader::new(
            client,
            ContentLoaderConfig {
                cache_ttl: config.content.cache_ttl(),
            },
        );
        let language = LanguageStore::new(open_session(config, version));

        Ok(Self { loader, language })
    }
}
