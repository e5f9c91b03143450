//! Session storage abstraction for the WBB content client.
//!
//! A session is a small string key-value store that lives for the duration of
//! a visitor session, in the spirit of the browser's `sessionStorage`. The
//! language preference is the main consumer.
//!
//! - [`SessionStorage`]: the trait consumers depend on
//! - [`NullSession`]: stores nothing (always misses)
//! - [`MemorySession`]: process-local map, gone when the process exits
//! - [`FileSession`]: one file per key under a directory, survives restarts
//!
//! # Example
//!
//! ```
//! use wbb_session::{MemorySession, SessionStorage};
//!
//! let session = MemorySession::new();
//! session.set_item("language", "bn");
//! assert_eq!(session.get_item("language").as_deref(), Some("bn"));
//! ```

mod file;
pub use file::FileSession;

use std::collections::HashMap;
use std::sync::RwLock;

/// String key-value store scoped to one visitor session.
///
/// Writes are best effort: failures are logged by the implementation and
/// never surfaced, so callers can treat persistence as fire-and-forget.
pub trait SessionStorage: Send + Sync {
    /// Read the value stored under `key`.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str);

    /// Remove `key` if present.
    fn remove_item(&self, key: &str);
}

/// No-op [`SessionStorage`].
///
/// Every `get_item` returns `None`; writes are discarded.
pub struct NullSession;

impl SessionStorage for NullSession {
    fn get_item(&self, _key: &str) -> Option<String> {
        None
    }

    fn set_item(&self, _key: &str, _value: &str) {}

    fn remove_item(&self, _key: &str) {}
}

/// In-memory [`SessionStorage`] backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemorySession {
    items: RwLock<HashMap<String, String>>,
}

impl MemorySession {
    /// Create an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemorySession {
    fn get_item(&self, key: &str) -> Option<String> {
        let items = self.items.read().ok()?;
        items.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        match self.items.write() {
            Ok(mut items) => {
                items.insert(key.to_owned(), value.to_owned());
            }
            Err(e) => tracing::warn!("session lock poisoned, dropping write to {key}: {e}"),
        }
    }

    fn remove_item(&self, key: &str) {
        if let Ok(mut items) = self.items.write() {
            items.remove(key);
        }
    }
}
