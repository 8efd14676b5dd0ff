//! Authentication and registration layer for the clinic scheduling app.
//!
//! Two resolvers implement [`auth::service::AuthService`]: a mock that
//! resolves against fixed and locally registered accounts, and one that
//! delegates to the backend over HTTP. The binary serves the mock over the
//! same HTTP contract the remote resolver speaks.

pub mod core {
    pub mod config;
    pub mod error;
    pub mod routes;
    pub mod startup;
    pub mod state;
    pub mod tracing_init;
}

pub mod api {
    pub mod client;
}

pub mod auth {
    pub mod directory;
    pub mod mock;
    pub mod remote;
    pub mod service;
}

pub mod form {
    pub mod register;
}

pub mod handlers {
    pub mod auth;
    pub mod doctors;
    pub mod fallback;
    pub mod health;
}

pub mod models {
    pub mod api;
    pub mod response;
    pub mod user;
}

pub mod stores {
    pub mod file_store;
    pub mod kv;
    pub mod registered_users;
    pub mod session;
}

pub mod utils {
    pub mod auth;
    pub mod time;
}

pub use crate::auth::mock::MockAuthService;
pub use crate::auth::remote::RemoteAuthService;
pub use crate::auth::service::AuthService;
pub use crate::core::error::{AuthError, FormError};
pub use crate::models::user::{AccountType, Credentials, RegisterData, Role, Session, User};
