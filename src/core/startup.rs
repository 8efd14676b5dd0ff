use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::core::config::Config;
use crate::core::state::AppState;
use crate::stores::file_store::FileStore;

// this runs at boot time
pub fn build_state(config: Config) -> Result<AppState> {
    let store = FileStore::open(config.storage.path.clone()).context(format!(
        "Failed to open store at {}",
        config.storage.path.display()
    ))?;

    info!(path = %store.path().display(), "Store opened");

    match &config.api {
        Some(api) => info!(
            base_url = %api.base_url,
            timeout_secs = api.timeout_secs,
            "Serving doctors from upstream backend"
        ),
        None => info!(doctors = config.mock.doctors.len(), "Serving configured doctors"),
    }

    let state = AppState::new(&config, Arc::new(store))?;
    restore_registered_users(&state);

    Ok(state)
}

/// Reload self-registered patients persisted by a previous run
pub fn restore_registered_users(state: &AppState) -> usize {
    let loaded = state.auth.load_registered_users();

    info!(registered_users = loaded, "Registered users restored");

    loaded
}
