use super::files::{atomic_write, read_file, remove_file};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Durable string key-value storage
pub trait KeyValueStore {
    /// Value for `key`, None if absent
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Overwrite the value for `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    /// Delete `key`. Removing an absent key succeeds.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            anyhow::bail!("Invalid storage key: {:?}", key);
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        read_file(self.path_for(key)?)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        atomic_write(&path, value).with_context(|| format!("Failed to store key {:?}", key))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        remove_file(self.path_for(key)?)
    }
}

/// In-memory store for tests
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
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

// Lets tests keep a handle on a store after handing it to the app
#[cfg(test)]
impl<S: KeyValueStore> KeyValueStore for std::rc::Rc<std::cell::RefCell<S>> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.borrow_mut().set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.borrow_mut().remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_set_get_remove() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        assert_eq!(store.get("tasks").unwrap(), None);

        store.set("tasks", "[]").unwrap();
        assert_eq!(store.get("tasks").unwrap().as_deref(), Some("[]"));
        assert!(temp_dir.path().join("tasks.json").exists());

        store.remove("tasks").unwrap();
        assert_eq!(store.get("tasks").unwrap(), None);
        store.remove("tasks").unwrap();
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        assert!(store.set("../escape", "x").is_err());
        assert!(store.get("").is_err());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}
