// Application state (AppState) for the mock backend

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::api::client::ApiClient;
use crate::auth::directory::{DoctorDirectory, StaticDirectory};
use crate::auth::mock::{MockAuthService, MockSettings};
use crate::core::config::Config;
use crate::stores::kv::KeyValueStore;

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    /// Resolver answering /auth/* requests
    pub auth: Arc<MockAuthService>,

    /// Doctors served by /usuarios/medicos, also consulted by `auth`
    pub doctors: Arc<dyn DoctorDirectory>,
}

impl AppState {
    pub fn new(config: &Config, storage: Arc<dyn KeyValueStore>) -> Result<Self> {
        let doctors = doctor_directory(config)?;

        let auth = Arc::new(MockAuthService::new(
            MockSettings::from(&config.mock),
            doctors.clone(),
            storage,
        ));

        Ok(Self { auth, doctors })
    }
}

/// Upstream backend when `[api]` is configured, otherwise `[[mock.doctors]]`
fn doctor_directory(config: &Config) -> Result<Arc<dyn DoctorDirectory>> {
    match &config.api {
        Some(api) => {
            let client = ApiClient::from_config(api).context("Failed to create API client")?;
            Ok(Arc::new(client))
        }
        None => Ok(Arc::new(StaticDirectory::new(config.mock.doctors.clone()))),
    }
}
