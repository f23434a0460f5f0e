// SPDX-FileCopyrightText: 2026 Tagflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`SessionStorage`] backends: process memory and a JSON file on disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tagflow_config::model::{SessionBackend, SessionConfig};
use tagflow_core::{SessionStorage, TagflowError};
use tracing::{debug, warn};

/// Builds the backend selected by `[session]`.
pub fn open_storage(config: &SessionConfig) -> Box<dyn SessionStorage> {
    match config.backend {
        SessionBackend::File => Box::new(FileStorage::new(&config.path)),
        SessionBackend::Memory => Box::new(MemoryStorage::new()),
    }
}

/// Storage that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, TagflowError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TagflowError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), TagflowError> {
        self.entries().remove(key);
        Ok(())
    }
}

/// Storage persisted as a flat JSON object.
///
/// Every write replaces the file through a sibling temp file and a rename,
/// so a crash never leaves a half-written session behind.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw file content; `None` when the file is missing or blank.
    fn read(&self) -> Result<Option<String>, TagflowError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(None),
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TagflowError::storage(e)),
        }
    }

    fn load(&self) -> Result<BTreeMap<String, String>, TagflowError> {
        match self.read()? {
            Some(content) => serde_json::from_str(&content).map_err(TagflowError::storage),
            None => Ok(BTreeMap::new()),
        }
    }

    fn store(&self, entries: &BTreeMap<String, String>) -> Result<(), TagflowError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(TagflowError::storage)?;
        }

        let json = serde_json::to_string_pretty(entries).map_err(TagflowError::storage)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(TagflowError::storage)?;
        std::fs::rename(&tmp, &self.path).map_err(TagflowError::storage)?;
        debug!(path = %self.path.display(), keys = entries.len(), "session file written");
        Ok(())
    }

    fn update(
        &self,
        mutate: impl FnOnce(&mut BTreeMap<String, String>) -> bool,
    ) -> Result<(), TagflowError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        // A corrupt file counts as empty and is rewritten.
        let (mut entries, corrupt) = match self.read()? {
            None => (BTreeMap::new(), false),
            Some(content) => match serde_json::from_str::<BTreeMap<String, String>>(&content) {
                Ok(entries) => (entries, false),
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "discarding unreadable session file");
                    (BTreeMap::new(), true)
                }
            },
        };
        if mutate(&mut entries) || corrupt {
            self.store(&entries)?;
        }
        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, TagflowError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TagflowError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), TagflowError> {
        self.update(|entries| entries.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("k").unwrap(), None);
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }

    #[test]
    fn file_storage_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("session.json"));
        assert_eq!(storage.get("auth_token").unwrap(), None);
    }

    #[test]
    fn file_storage_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        FileStorage::new(&path).set("auth_token", "abc").unwrap();
        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get("auth_token").unwrap().as_deref(), Some("abc"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn file_storage_remove_absent_key_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("session.json"));
        storage.remove("username").unwrap();
        assert!(!storage.path().exists());
    }

    #[test]
    fn file_storage_reports_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();
        let err = FileStorage::new(&path).get("auth_token").unwrap_err();
        assert!(matches!(err, TagflowError::Storage { .. }));
    }

    #[test]
    fn file_storage_write_replaces_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{truncated").unwrap();
        let storage = FileStorage::new(&path);

        storage.remove("username").unwrap();
        assert_eq!(storage.get("username").unwrap(), None);

        std::fs::write(&path, "{truncated").unwrap();
        storage.set("auth_token", "abc").unwrap();
        assert_eq!(storage.get("auth_token").unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn open_storage_honors_backend() {
        let dir = tempfile::tempdir().unwrap();
        let config = SessionConfig {
            backend: SessionBackend::File,
            path: dir.path().join("s.json").display().to_string(),
        };
        open_storage(&config).set("a", "b").unwrap();
        assert!(dir.path().join("s.json").exists());
    }
}
