//! Bearer token persistence.
//!
//! The session token lives in a single named slot: one file under the
//! user config dir (or an explicit override path). Storage that cannot
//! be read or written degrades silently to "no persisted token"; none
//! of these operations ever error.

use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const SLOT_FILE: &str = "admin_auth_token";

#[derive(Debug, Clone)]
pub struct TokenSlot {
    path: Option<PathBuf>,
}

impl TokenSlot {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: Some(path.into()) }
    }

    /// Default slot under the per-user config dir. A platform without a
    /// resolvable config dir yields a slot that never persists.
    pub fn default_slot() -> Self {
        let path = ProjectDirs::from("", "", "folio")
            .map(|dirs| dirs.config_dir().join(SLOT_FILE));
        Self { path }
    }

    /// A slot that never reads or writes anything.
    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn load(&self) -> Option<String> {
        let path = self.path.as_ref()?;
        let token = fs::read_to_string(path).ok()?;
        let token = token.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    pub fn store(&self, token: &str) {
        let Some(path) = self.path.as_ref() else {
            return;
        };
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Err(e) = fs::write(path, token) {
            debug!(path = %path.display(), "token slot write failed: {e}");
        }
    }

    pub fn clear(&self) {
        if let Some(path) = self.path.as_ref() {
            let _ = fs::remove_file(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_load_clear_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let slot = TokenSlot::at(dir.path().join("nested").join("token"));

        assert_eq!(slot.load(), None);
        slot.store("tok-123");
        assert_eq!(slot.load(), Some("tok-123".to_string()));
        slot.clear();
        assert_eq!(slot.load(), None);
    }

    #[test]
    fn test_whitespace_only_slot_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let slot = TokenSlot::at(dir.path().join("token"));
        slot.store("   \n");
        assert_eq!(slot.load(), None);
    }

    #[test]
    fn test_disabled_slot_never_errors() {
        let slot = TokenSlot::disabled();
        slot.store("tok");
        assert_eq!(slot.load(), None);
        slot.clear();
    }
}
