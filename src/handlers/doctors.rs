use crate::core::error::AuthError;
use crate::core::state::AppState;
use crate::models::api::ApiUser;
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// List every doctor
///
/// GET /usuarios/medicos
pub async fn doctors_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ApiUser>>, AuthError> {
    let doctors = state.doctors.all_doctors().await.map_err(|e| {
        let message = format!("{:#}", e);
        warn!(error = %message, "Doctor directory unavailable");
        AuthError::DoctorsUnavailable
    })?;

    Ok(Json(doctors))
}

/// List doctors with a given specialty (case-insensitive)
///
/// GET /usuarios/medicos/especialidade/{specialty}
pub async fn doctors_by_specialty_handler(
    State(state): State<Arc<AppState>>,
    Path(specialty): Path<String>,
) -> Result<Json<Vec<ApiUser>>, AuthError> {
    let doctors = state
        .doctors
        .doctors_by_specialty(&specialty)
        .await
        .map_err(|e| {
            let message = format!("{:#}", e);
            warn!(specialty = %specialty, error = %message, "Doctor directory unavailable");
            AuthError::DoctorsUnavailable
        })?;

    debug!(specialty = %specialty, found = doctors.len(), "Doctors by specialty");
    Ok(Json(doctors))
}
