//! Liveness endpoint.

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::AppState;

/// GET `/health` - Reports the service identity and build version.
async fn health() -> Json<Value> {
    Json(json!({
        "service": "studio-ledger",
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Creates the health routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_reports_service_identity() {
        let Json(body) = health().await;
        assert_eq!(body["service"], "studio-ledger");
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }
}
