use crate::core::error::AuthError;
use crate::core::state::AppState;
use crate::models::user::{Credentials, RegisterData, Session, User};
use crate::utils::auth::bearer_token;
use axum::{extract::State, http::HeaderMap, Json};
use std::sync::Arc;
use tracing::{info, warn};

/// Sign in against the mock resolver
///
/// POST /auth/login
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<Session>, AuthError> {
    let session = state.auth.authenticate(&credentials).await?;

    info!(user_id = %session.user.id, role = ?session.user.role, "Login succeeded");

    Ok(Json(session))
}

/// Register a new patient
///
/// POST /auth/register
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(data): Json<RegisterData>,
) -> Result<Json<Session>, AuthError> {
    let session = state.auth.register_patient(&data).await?;
    Ok(Json(session))
}

/// List registered patients
///
/// GET /usuarios/pacientes  (Authorization: Bearer <token>)
pub async fn patients_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<User>>, AuthError> {
    let Some(token) = bearer_token(&headers) else {
        warn!("Patients requested without bearer token");
        return Err(AuthError::PatientsUnavailable);
    };

    if state.auth.user_for_token(token).await.is_none() {
        warn!("Patients requested with unknown token");
        return Err(AuthError::PatientsUnavailable);
    }

    Ok(Json(state.auth.registered_patients()))
}
