//! `wbb lang` command implementation.

use std::sync::Arc;

use clap::{Args, Subcommand};
use wbb_lang::{Language, LanguageStore};
use wbb_session::SessionStorage;

use crate::GlobalArgs;
use crate::context::{load_config, open_session};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the lang command.
#[derive(Args)]
pub(crate) struct LangArgs {
    #[command(subcommand)]
    action: Option<LangAction>,
}

#[derive(Subcommand, Clone, Copy)]
enum LangAction {
    /// Switch between English and Bengali.
    Toggle,
}

impl LangArgs {
    /// Execute the lang command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails.
    pub(crate) fn execute(self, global: &GlobalArgs, version: &str) -> Result<(), CliError> {
        let output = Output::new();
        let config = load_config(global)?;
        let session = open_session(&config, version);

        let language = apply(session, self.action);
        if config.session_resolved.dir.is_none() {
            output.warning("No [session] dir configured; the choice lasts for this run only");
        }
        output.line(language.code());
        Ok(())
    }
}

/// Run `action` against the language stored in `session`.
fn apply(session: Arc<dyn SessionStorage>, action: Option<LangAction>) -> Language {
    let store = LanguageStore::new(session);
    match action {
        Some(LangAction::Toggle) => store.toggle(),
        None => store.current(),
    }
}
