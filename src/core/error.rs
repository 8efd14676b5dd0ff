// Centralized error handling for the auth layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use crate::models::response::ErrorResponse;

/// Errors surfaced by the auth resolvers
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email already in use")]
    EmailInUse,

    #[error("Registration failed")]
    RegistrationFailed,

    #[error("Failed to load patients")]
    PatientsUnavailable,

    #[error("Failed to load doctors")]
    DoctorsUnavailable,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl AuthError {
    pub fn storage(err: anyhow::Error) -> Self {
        AuthError::Storage(format!("{:#}", err))
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::EmailInUse => StatusCode::CONFLICT,
            AuthError::RegistrationFailed => StatusCode::BAD_REQUEST,
            AuthError::PatientsUnavailable => StatusCode::UNAUTHORIZED,
            AuthError::DoctorsUnavailable => StatusCode::BAD_GATEWAY,
            AuthError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(ErrorResponse {
                success: false,
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Errors shown on the registration screen.
///
/// The messages are the exact strings the user sees; the underlying cause is
/// deliberately not surfaced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Failed to create account. Please try again.")]
    RegistrationFailed,
}
