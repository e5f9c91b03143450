//! File-backed session storage.
//!
//! [`FileSession`] keeps each session key in its own file under a root
//! directory, so a preference written by one process is visible to the next:
//!
//! ```text
//! {root}/
//! +-- VERSION      # session format version
//! +-- language     # value of the "language" key
//! ```
//!
//! On construction the `VERSION` file is checked. A missing or different
//! version wipes the directory so stale sessions from an older layout are
//! never read back.

use std::fs;
use std::path::{Path, PathBuf};

use crate::SessionStorage;

/// File-based [`SessionStorage`] rooted at a directory on disk.
pub struct FileSession {
    root: PathBuf,
}

impl FileSession {
    /// Open (or create) a session directory at `root`.
    ///
    /// Errors during version validation are logged but never fatal; a session
    /// that cannot be written simply behaves like an empty one.
    #[must_use]
    pub fn new(root: PathBuf, version: &str) -> Self {
        validate_version(&root, version);
        Self { root }
    }

    /// Session root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn item_path(&self, key: &str) -> Option<PathBuf> {
        if is_valid_key(key) {
            Some(self.root.join(key))
        } else {
            tracing::warn!("rejecting session key {key:?}");
            None
        }
    }
}

/// Keys map directly to file names, so only a conservative charset is allowed.
fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key != "VERSION"
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

impl SessionStorage for FileSession {
    fn get_item(&self, key: &str) -> Option<String> {
        let path = self.item_path(key)?;
        fs::read_to_string(path).ok()
    }

    fn set_item(&self, key: &str, value: &str) {
        let Some(path) = self.item_path(key) else {
            return;
        };
        if let Err(e) = fs::create_dir_all(&self.root) {
            tracing::warn!("failed to create session directory: {e}");
            return;
        }
        if let Err(e) = fs::write(&path, value) {
            tracing::warn!("failed to persist session key {key}: {e}");
        }
    }

    fn remove_item(&self, key: &str) {
        let Some(path) = self.item_path(key) else {
            return;
        };
        if path.exists()
            && let Err(e) = fs::remove_file(&path)
        {
            tracing::debug!("failed to remove session key {key}: {e}");
        }
    }
}

/// Validate the session version, wiping the directory on mismatch.
fn validate_version(root: &Path, version: &str) {
    let version_file = root.join("VERSION");

    match fs::read_to_string(&version_file) {
        Ok(stored) if stored == version => {
            tracing::debug!("session version matches: {version}");
            return;
        }
        Ok(stored) => {
            tracing::info!(
                "session version mismatch (stored={stored}, current={version}), resetting session"
            );
        }
        Err(_) => {
            tracing::debug!("no session VERSION file found, initializing session");
        }
    }

    if root.exists()
        && let Err(e) = fs::remove_dir_all(root)
    {
        tracing::warn!("failed to remove session directory: {e}");
    }
    if let Err(e) = fs::create_dir_all(root) {
        tracing::warn!("failed to create session directory: {e}");
        return;
    }
    if let Err(e) = fs::write(&version_file, version) {
        tracing::warn!("failed to write session VERSION file: {e}");
    }
}
