// HTTP routes configuration

use crate::core::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Auth endpoints
        .route("/auth/login", post(crate::handlers::auth::login_handler))
        .route("/auth/register", post(crate::handlers::auth::register_handler))

        // User listings
        .route("/usuarios/pacientes", get(crate::handlers::auth::patients_handler))
        .route("/usuarios/medicos", get(crate::handlers::doctors::doctors_handler))
        .route(
            "/usuarios/medicos/especialidade/{specialty}",
            get(crate::handlers::doctors::doctors_by_specialty_handler),
        )

        .route("/health", get(crate::handlers::health::health_handler))

        // 404 fallback for all unmatched routes
        .fallback(crate::handlers::fallback::fallback_handler)

        .with_state(state)
}
