//! Firm-wide summary route.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use serde_json::json;
use tracing::error;

use crate::AppState;
use studio_core::summary::Summary;
use studio_db::repositories::SummaryRepository;

use super::error_response;

/// Creates the summary routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/summary", get(get_summary))
}

fn summary_response(summary: &Summary) -> serde_json::Value {
    json!({
        "income": {
            "total_fee": summary.income.total_fee.to_string(),
            "received": summary.income.received.to_string(),
            "pending": summary.income.pending.to_string(),
            "other_income": summary.income.other_income.to_string(),
        },
        "expenses": {
            "total": summary.expenses.total.to_string(),
        },
        "net_position": summary.net_position.to_string(),
    })
}

/// GET `/summary` - The firm-wide rollup across projects and accounts.
async fn get_summary(State(state): State<AppState>) -> impl IntoResponse {
    let repo = SummaryRepository::new((*state.db).clone());

    match repo.get_summary().await {
        Ok(summary) => Json(summary_response(&summary)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to compute summary");
            error_response(e.http_status_code(), e.error_code(), &e.to_string())
        }
    }
}
