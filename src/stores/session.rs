use anyhow::{Context, Result};
use std::sync::Arc;

use crate::models::user::{Session, User};
use crate::stores::kv::{keys, KeyValueStore};

/// Reads and writes the persisted session under the fixed storage keys
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Overwrite the stored session with this one
    pub fn save(&self, session: &Session) -> Result<()> {
        let user_json =
            serde_json::to_string(&session.user).context("Failed to serialize user")?;

        self.store
            .set_item(keys::USER, &user_json)
            .context("Failed to store user")?;
        self.store
            .set_item(keys::TOKEN, &session.token)
            .context("Failed to store token")?;
        Ok(())
    }

    /// Remove both session keys
    pub fn clear(&self) -> Result<()> {
        self.store
            .remove_item(keys::USER)
            .context("Failed to remove user")?;
        self.store
            .remove_item(keys::TOKEN)
            .context("Failed to remove token")?;
        Ok(())
    }

    pub fn token(&self) -> Result<Option<String>> {
        self.store.get_item(keys::TOKEN).context("Failed to read token")
    }

    /// Ok(None) when nothing is stored; Err when the value does not parse
    pub fn user(&self) -> Result<Option<User>> {
        let Some(user_json) = self.store.get_item(keys::USER).context("Failed to read user")? else {
            return Ok(None);
        };

        let user = serde_json::from_str(&user_json).context("Failed to parse stored user")?;
        Ok(Some(user))
    }
}
