use anyhow::Result;
use dashmap::DashMap;

/// Storage keys shared by both resolvers
pub mod keys {
    pub const USER: &str = "@MedicalApp:user";
    pub const TOKEN: &str = "@MedicalApp:token";
    pub const REGISTERED_USERS: &str = "@MedicalApp:registeredUsers";
}

/// Persistent string key-value storage.
///
/// Writes replace the whole value; there is no versioning, last write wins.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// In-memory store, lost on drop
pub struct MemoryStore {
    items: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).map(|entry| entry.value().clone()))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.get_item(keys::TOKEN).unwrap().is_none());

        store.set_item(keys::TOKEN, "admin-token").unwrap();
        assert_eq!(store.get_item(keys::TOKEN).unwrap().as_deref(), Some("admin-token"));

        store.set_item(keys::TOKEN, "patient-token-patient-1").unwrap();
        assert_eq!(
            store.get_item(keys::TOKEN).unwrap().as_deref(),
            Some("patient-token-patient-1")
        );

        store.remove_item(keys::TOKEN).unwrap();
        assert!(store.get_item(keys::TOKEN).unwrap().is_none());
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let store = MemoryStore::new();
        assert!(store.remove_item(keys::USER).is_ok());
    }
}
