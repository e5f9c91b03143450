//! Active language state.
//!
//! [`LanguageStore`] is a two-state machine (`en` / `bn`) whose only
//! transition is [`toggle`](LanguageStore::toggle). The initial state is read
//! from the session and every transition is written back synchronously.

use std::sync::{Arc, RwLock};

use wbb_session::SessionStorage;

use crate::Language;

/// Session key holding the active language code.
pub const LANGUAGE_SESSION_KEY: &str = "language";

/// Holds the active language for one visitor session.
pub struct LanguageStore {
    session: Arc<dyn SessionStorage>,
    current: RwLock<Language>,
}

impl LanguageStore {
    /// Create a store, restoring the language persisted in `session`.
    ///
    /// Falls back to English when nothing (or an unknown code) is stored.
    #[must_use]
    pub fn new(session: Arc<dyn SessionStorage>) -> Self {
        let current = match session.get_item(LANGUAGE_SESSION_KEY) {
            Some(code) => Language::parse(&code).unwrap_or_else(|| {
                tracing::warn!(code = %code, "ignoring unknown persisted language");
                Language::default()
            }),
            None => Language::default(),
        };
        tracing::debug!(language = %current, "language store initialized");

        Self {
            session,
            current: RwLock::new(current),
        }
    }

    /// Active language.
    #[must_use]
    pub fn current(&self) -> Language {
        match self.current.read() {
            Ok(lang) => *lang,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Flip to the other language, persist it, and return it.
    pub fn toggle(&self) -> Language {
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let next = guard.toggled();
        *guard = next;
        self.session.set_item(LANGUAGE_SESSION_KEY, next.code());
        tracing::info!(language = %next, "language toggled");
        next
    }
}
