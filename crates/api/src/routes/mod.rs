//! API route definitions.

use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::AppState;

pub mod accounts;
pub mod health;
pub mod ledger;
pub mod projects;
pub mod summary;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(projects::routes())
        .merge(ledger::routes())
        .merge(accounts::routes())
        .merge(summary::routes())
}

/// Builds a JSON error response from a domain error code and message.
pub(crate) fn error_response(status: u16, code: &str, message: &str) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": code,
            "message": message
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_error_response_shape() {
        let response = error_response(404, "PROJECT_NOT_FOUND", "Project not found: abc");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "PROJECT_NOT_FOUND");
        assert_eq!(json["message"], "Project not found: abc");
    }

    #[tokio::test]
    async fn test_error_response_bad_status_falls_back_to_500() {
        let response = error_response(42, "X", "y");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
