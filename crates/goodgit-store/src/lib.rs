use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use goodgit_core::error::GoodgitError;
use goodgit_core::models::identity::Identity;

/// Registered identities keyed by alias.
pub type Identities = BTreeMap<String, Identity>;

/// Trait for identity persistence backends.
///
/// Every mutation is a whole-document replace; nothing is cached between calls.
pub trait IdentityStore: Send + Sync {
    /// Read every registered identity.
    fn load(&self) -> Result<Identities, GoodgitError>;

    /// Replace the stored identities with `identities`.
    fn save(&self, identities: &Identities) -> Result<(), GoodgitError>;

    /// Look up a single alias.
    fn get(&self, alias: &str) -> Result<Option<Identity>, GoodgitError> {
        Ok(self.load()?.remove(alias))
    }

    /// Insert or replace the identity stored under `alias`.
    fn upsert(&self, alias: &str, identity: Identity) -> Result<(), GoodgitError> {
        let mut identities = self.load()?;
        identities.insert(alias.to_string(), identity);
        self.save(&identities)
    }

    /// Remove `alias`, returning the identity it held.
    fn delete(&self, alias: &str) -> Result<Option<Identity>, GoodgitError> {
        let mut identities = self.load()?;
        let removed = identities.remove(alias);
        if removed.is_some() {
            self.save(&identities)?;
        }
        Ok(removed)
    }
}

/// Identity store backed by a JSON document on disk.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn corrupt(&self, message: impl ToString) -> GoodgitError {
        GoodgitError::CorruptStore {
            path: self.path.clone(),
            message: message.to_string(),
        }
    }
}

impl IdentityStore for JsonFileStore {
    fn load(&self) -> Result<Identities, GoodgitError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "creating empty identity store");
            self.save(&Identities::new())?;
        }
        let content = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| self.corrupt(e))
    }

    fn save(&self, identities: &Identities) -> Result<(), GoodgitError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(identities)
            .map_err(|e| GoodgitError::Serialization(e.to_string()))?;
        std::fs::write(&self.path, content)?;
        tracing::debug!(
            path = %self.path.display(),
            count = identities.len(),
            "saved identity store"
        );
        Ok(())
    }
}

/// In-memory identity store for testing.
pub struct MemoryStore {
    identities: Mutex<Identities>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            identities: Mutex::new(Identities::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityStore for MemoryStore {
    fn load(&self) -> Result<Identities, GoodgitError> {
        Ok(self.identities.lock().unwrap().clone())
    }

    fn save(&self, identities: &Identities) -> Result<(), GoodgitError> {
        *self.identities.lock().unwrap() = identities.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> Identity {
        Identity::new("personal", "Jane", "jane@x.com").unwrap()
    }

    #[test]
    fn test_load_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".goodgit.json");
        let store = JsonFileStore::new(&path);

        assert!(store.load().unwrap().is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_upsert_writes_expected_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".goodgit.json");
        let store = JsonFileStore::new(&path);

        store.upsert("personal", jane()).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            written,
            serde_json::json!({
                "personal": {
                    "username": "Jane",
                    "email": "jane@x.com",
                    "ssh_key": "personal"
                }
            })
        );
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".goodgit.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, GoodgitError::CorruptStore { .. }));
        // The corrupt file is left alone.
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_wrong_shape_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".goodgit.json");
        std::fs::write(&path, r#"{"personal": {"username": "Jane"}}"#).unwrap();

        assert!(matches!(
            JsonFileStore::new(&path).load(),
            Err(GoodgitError::CorruptStore { .. })
        ));
    }

    #[test]
    fn test_delete_last_alias_leaves_empty_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".goodgit.json");
        let store = JsonFileStore::new(&path);
        store.upsert("personal", jane()).unwrap();

        let removed = store.delete("personal").unwrap();
        assert_eq!(removed, Some(jane()));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_memory_store_crud() {
        let store = MemoryStore::new();
        assert_eq!(store.get("personal").unwrap(), None);
        store.upsert("personal", jane()).unwrap();
        assert_eq!(store.get("personal").unwrap(), Some(jane()));
        assert_eq!(store.delete("personal").unwrap(), Some(jane()));
        assert_eq!(store.get("personal").unwrap(), None);
    }

    #[test]
    fn test_memory_store_delete_nonexistent() {
        let store = MemoryStore::new();
        assert_eq!(store.delete("no-such-alias").unwrap(), None);
    }
}
