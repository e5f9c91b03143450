//! Language selection and localized fields.
//!
//! The site is published in English and Bengali. This crate provides:
//!
//! - [`Language`]: the two supported language codes
//! - [`Localized`]: a translated field with English fallback
//! - [`LanguageStore`]: the active language, persisted to a session
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use wbb_lang::{Language, LanguageStore, Localized};
//! use wbb_session::MemorySession;
//!
//! let store = LanguageStore::new(Arc::new(MemorySession::new()));
//! assert_eq!(store.current(), Language::En);
//!
//! let title = Localized::new("Research".to_owned(), String::new());
//! store.toggle();
//! assert_eq!(title.get(store.current()), "Research"); // falls back to English
//! ```

mod language;
mod localized;
mod store;

pub use language::Language;
pub use localized::{Blank, Localized};
pub use store::{LANGUAGE_SESSION_KEY, LanguageStore};
