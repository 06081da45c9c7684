//! Key-value stores backing the cross-invocation handoff and the access
//! token. The handoff store plays the role of session storage: written by the
//! signup flow, read once by the login flow, then cleared.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Session-scoped key carrying the signup email to the login flow.
pub const SIGNUP_EMAIL_KEY: &str = "signup_email";
/// Session-scoped key carrying the TOTP secret to the login flow.
pub const TOTP_SECRET_KEY: &str = "totp_secret";
/// Durable key holding the access token after a successful login.
pub const TOKEN_KEY: &str = "token";

const HANDOFF_FILE: &str = "handoff.json";
const CREDENTIALS_FILE: &str = "credentials.json";

/// Minimal string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    /// Returns an error if the entry cannot be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// # Errors
    /// Returns an error if the removal cannot be persisted.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store used by tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// JSON map persisted to a single file. A missing or corrupt file loads as
/// empty; writes create the parent directory on demand.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    #[must_use]
    pub fn load(path: PathBuf) -> Self {
        let entries = fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();

        Self { path, entries }
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let encoded = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, encoded)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        // Only touch the file when something was actually stored, so cleanup
        // of an absent handoff does not create state files.
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Session-scoped store carrying the signup handoff.
#[must_use]
pub fn session_store(state_dir: &Path) -> FileStore {
    FileStore::load(state_dir.join(HANDOFF_FILE))
}

/// Durable store holding the access token.
#[must_use]
pub fn token_store(state_dir: &Path) -> FileStore {
    FileStore::load(state_dir.join(CREDENTIALS_FILE))
}

/// Default state directory, with a dotfile fallback when the platform
/// directories cannot be resolved.
#[must_use]
pub fn default_state_dir() -> PathBuf {
    if let Some(mut dir) = dirs::data_local_dir() {
        dir.push("konto");
        return dir;
    }

    if let Some(mut dir) = dirs::home_dir() {
        dir.push(".konto");
        return dir;
    }

    PathBuf::from(".konto")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() -> Result<()> {
        let mut store = MemoryStore::new();
        assert_eq!(store.get(SIGNUP_EMAIL_KEY), None);

        store.set(SIGNUP_EMAIL_KEY, "a@b.com")?;
        assert_eq!(store.get(SIGNUP_EMAIL_KEY), Some("a@b.com".to_string()));

        store.remove(SIGNUP_EMAIL_KEY)?;
        assert_eq!(store.get(SIGNUP_EMAIL_KEY), None);

        Ok(())
    }

    #[test]
    fn test_file_store_persists_across_loads() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("handoff.json");

        let mut store = FileStore::load(path.clone());
        store.set(SIGNUP_EMAIL_KEY, "a@b.com")?;
        store.set(TOTP_SECRET_KEY, "JBSWY3DPEHPK3PXP")?;

        let reloaded = FileStore::load(path);
        assert_eq!(reloaded.get(SIGNUP_EMAIL_KEY), Some("a@b.com".to_string()));
        assert_eq!(
            reloaded.get(TOTP_SECRET_KEY),
            Some("JBSWY3DPEHPK3PXP".to_string())
        );

        Ok(())
    }

    #[test]
    fn test_file_store_remove_persists() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("handoff.json");

        let mut store = FileStore::load(path.clone());
        store.set(SIGNUP_EMAIL_KEY, "a@b.com")?;
        store.remove(SIGNUP_EMAIL_KEY)?;

        let reloaded = FileStore::load(path);
        assert_eq!(reloaded.get(SIGNUP_EMAIL_KEY), None);

        Ok(())
    }

    #[test]
    fn test_file_store_corrupt_file_loads_empty() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("handoff.json");
        fs::write(&path, "not json")?;

        let store = FileStore::load(path);
        assert_eq!(store.get(SIGNUP_EMAIL_KEY), None);

        Ok(())
    }

    #[test]
    fn test_file_store_remove_absent_creates_nothing() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("handoff.json");

        let mut store = FileStore::load(path.clone());
        store.remove(SIGNUP_EMAIL_KEY)?;

        assert!(!path.exists());

        Ok(())
    }

    #[test]
    fn test_file_store_creates_parent_directory() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("nested").join("state").join("handoff.json");

        let mut store = FileStore::load(path.clone());
        store.set(TOKEN_KEY, "token-123")?;

        assert!(path.exists());

        Ok(())
    }
}
