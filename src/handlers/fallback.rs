use crate::models::response::ErrorResponse;
use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};

pub async fn fallback_handler(uri: Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            success: false,
            error: format!("No route for {}", uri.path()),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fallback_is_404() {
        let response = fallback_handler(Uri::from_static("/announce")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
