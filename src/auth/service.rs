use async_trait::async_trait;

use crate::core::error::AuthError;
use crate::models::user::{Credentials, RegisterData, Session, User};

/// The sign-in / registration contract shared by the mock and the
/// backend-backed resolvers.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve credentials into a session and persist it
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError>;

    async fn register(&self, data: &RegisterData) -> Result<Session, AuthError>;

    /// Forget the persisted session
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// The persisted user, or None when unset or unreadable
    async fn stored_user(&self) -> Option<User>;

    async fn all_doctors(&self) -> Vec<User>;

    async fn patients(&self) -> Result<Vec<User>, AuthError>;
}
