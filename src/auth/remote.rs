use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::api::client::ApiClient;
use crate::auth::service::AuthService;
use crate::core::error::AuthError;
use crate::models::user::{Credentials, RegisterData, Session, User};
use crate::stores::kv::KeyValueStore;
use crate::stores::session::SessionStore;

/// Resolver that delegates to the backend over HTTP.
///
/// Every backend failure (network, 4xx, 5xx, bad body) collapses into the
/// single error kind of the operation.
pub struct RemoteAuthService {
    api: ApiClient,
    sessions: SessionStore,
}

impl RemoteAuthService {
    pub fn new(api: ApiClient, storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            api,
            sessions: SessionStore::new(storage),
        }
    }
}

#[async_trait]
impl AuthService for RemoteAuthService {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let session = self.api.login(credentials).await.map_err(|e| {
            warn!(error = %e, email = %credentials.email, "Backend login failed");
            AuthError::InvalidCredentials
        })?;

        self.sessions.save(&session).map_err(AuthError::storage)?;
        debug!(user_id = %session.user.id, "Session stored");

        Ok(session)
    }

    /// The returned session is not persisted; callers sign in afterwards.
    async fn register(&self, data: &RegisterData) -> Result<Session, AuthError> {
        self.api.register(data).await.map_err(|e| {
            warn!(error = %e, email = %data.email, "Backend registration failed");
            AuthError::RegistrationFailed
        })
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.sessions.clear().map_err(AuthError::storage)
    }

    async fn stored_user(&self) -> Option<User> {
        self.sessions.user().ok().flatten()
    }

    /// The backend-backed variant does not serve doctors
    async fn all_doctors(&self) -> Vec<User> {
        Vec::new()
    }

    async fn patients(&self) -> Result<Vec<User>, AuthError> {
        let token = match self.sessions.token() {
            Ok(Some(token)) => token,
            Ok(None) => {
                warn!("No stored token, cannot load patients");
                return Err(AuthError::PatientsUnavailable);
            }
            Err(e) => return Err(AuthError::storage(e)),
        };

        self.api.patients(&token).await.map_err(|e| {
            warn!(error = %e, "Backend patients request failed");
            AuthError::PatientsUnavailable
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;
    use crate::stores::kv::{keys, MemoryStore};
    use std::time::Duration;

    // Nothing listens on port 9 (discard); connections are refused quickly.
    fn unreachable() -> (RemoteAuthService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let api = ApiClient::new("http://127.0.0.1:9/api", Duration::from_secs(2)).unwrap();
        (RemoteAuthService::new(api, store.clone()), store)
    }

    #[tokio::test]
    async fn test_network_failure_is_invalid_credentials() {
        let (auth, store) = unreachable();
        let result = auth
            .sign_in(&Credentials::new("admin@example.com", "123456"))
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        assert!(store.get_item(keys::USER).unwrap().is_none());
        assert!(store.get_item(keys::TOKEN).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_network_failure_is_registration_failed() {
        let (auth, _) = unreachable();
        let data = RegisterData {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "pw".to_string(),
            account_type: Default::default(),
        };

        let result = auth.register(&data).await;
        assert!(matches!(result, Err(AuthError::RegistrationFailed)));
    }

    #[tokio::test]
    async fn test_patients_without_token() {
        let (auth, _) = unreachable();
        assert!(matches!(
            auth.patients().await,
            Err(AuthError::PatientsUnavailable)
        ));
    }

    #[tokio::test]
    async fn test_stored_user_and_sign_out() {
        let (auth, store) = unreachable();
        let user = User::new(
            "patient-1".to_string(),
            "Ana".to_string(),
            "ana@example.com".to_string(),
            Role::Patient,
            String::new(),
        );
        store
            .set_item(keys::USER, &serde_json::to_string(&user).unwrap())
            .unwrap();
        store.set_item(keys::TOKEN, "patient-token-patient-1").unwrap();

        assert_eq!(auth.stored_user().await, Some(user));

        auth.sign_out().await.unwrap();
        assert!(auth.stored_user().await.is_none());
        assert!(store.get_item(keys::USER).unwrap().is_none());
        assert!(store.get_item(keys::TOKEN).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_stored_user_unparseable_is_none() {
        let (auth, store) = unreachable();
        store.set_item(keys::USER, "{").unwrap();
        assert!(auth.stored_user().await.is_none());
    }

    #[tokio::test]
    async fn test_no_doctors() {
        let (auth, _) = unreachable();
        assert!(auth.all_doctors().await.is_empty());
    }
}
