use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::stores::kv::KeyValueStore;

/// Key-value store backed by a single JSON object on disk.
///
/// The whole file is rewritten on every mutation through a temp file and a
/// rename, so a crash leaves either the old or the new contents.
pub struct FileStore {
    items: Mutex<BTreeMap<String, String>>,
    path: PathBuf,
}

impl FileStore {
    /// Open the store, creating an empty one if the file does not exist
    pub fn open(path: PathBuf) -> Result<Self> {
        let items = if path.exists() {
            let content = fs::read_to_string(&path)
                .context(format!("Failed to read store file: {}", path.display()))?;

            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)
                    .context(format!("Failed to parse store file: {}", path.display()))?
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            items: Mutex::new(items),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.items
            .lock()
            .map_err(|_| anyhow::anyhow!("Store lock poisoned"))
    }

    fn flush(&self, items: &BTreeMap<String, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(items).context("Failed to serialize store")?;

        let tmp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&tmp_path)
            .context(format!("Failed to create {}", tmp_path.display()))?;
        file.write_all(json.as_bytes())
            .context("Failed to write store")?;
        file.sync_all().context("Failed to sync store")?;

        fs::rename(&tmp_path, &self.path)
            .context(format!("Failed to replace store file: {}", self.path.display()))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.lock()?;
        items.insert(key.to_string(), value.to_string());
        self.flush(&items)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.lock()?;
        if items.remove(key).is_some() {
            self.flush(&items)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::kv::keys;
    use tempfile::TempDir;

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");

        let store = FileStore::open(path.clone()).unwrap();
        store.set_item(keys::TOKEN, "admin-token").unwrap();
        store.set_item(keys::USER, r#"{"id":"admin"}"#).unwrap();
        drop(store);

        let store = FileStore::open(path).unwrap();
        assert_eq!(store.get_item(keys::TOKEN).unwrap().as_deref(), Some("admin-token"));
        assert_eq!(
            store.get_item(keys::USER).unwrap().as_deref(),
            Some(r#"{"id":"admin"}"#)
        );
    }

    #[test]
    fn test_remove_is_persisted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");

        let store = FileStore::open(path.clone()).unwrap();
        store.set_item(keys::TOKEN, "admin-token").unwrap();
        store.remove_item(keys::TOKEN).unwrap();
        drop(store);

        let store = FileStore::open(path).unwrap();
        assert!(store.get_item(keys::TOKEN).unwrap().is_none());
    }

    #[test]
    fn test_missing_and_empty_files_open_empty() {
        let temp_dir = TempDir::new().unwrap();

        let missing = FileStore::open(temp_dir.path().join("nope.json")).unwrap();
        assert!(missing.get_item(keys::USER).unwrap().is_none());

        let empty_path = temp_dir.path().join("empty.json");
        fs::write(&empty_path, "  \n").unwrap();
        let empty = FileStore::open(empty_path).unwrap();
        assert!(empty.get_item(keys::USER).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        fs::write(&path, "not json").unwrap();

        assert!(FileStore::open(path).is_err());
    }
}
