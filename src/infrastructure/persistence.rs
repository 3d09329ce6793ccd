use crate::domain::{StorageError, StorageResult};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Local key-value storage with last-write-wins semantics per key.
pub trait KeyValueStore {
    fn write(&mut self, key: &str, value: &str) -> StorageResult<()>;
    fn read(&self, key: &str) -> StorageResult<Option<String>>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).write(key, value)
    }

    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).read(key)
    }
}

/// Stores every entry in a single JSON object file.
///
/// An optional quota caps the size of the whole file, mirroring the
/// quota failure of browser local storage.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    quota_bytes: Option<usize>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            quota_bytes: None,
        }
    }

    pub fn with_quota(mut self, quota_bytes: usize) -> Self {
        self.quota_bytes = Some(quota_bytes);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_entries(&self) -> StorageResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }
}

impl KeyValueStore for JsonFileStore {
    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.load_entries()?;
        entries.insert(key.to_string(), value.to_string());

        let json = serde_json::to_string_pretty(&entries)?;
        if let Some(quota) = self.quota_bytes {
            if json.len() > quota {
                return Err(StorageError::QuotaExceeded {
                    needed: json.len(),
                    quota,
                });
            }
        }

        fs::write(&self.path, json)?;
        Ok(())
    }

    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.load_entries()?.get(key).cloned())
    }
}

/// In-process store; contents are lost when the process exits.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }
}
