//! Project fee ledger routes: fee, payments, and the ledger view.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::AppState;
use studio_core::ledger::{
    LedgerError, LedgerSnapshot, LedgerTotals, Payment, PaymentInput, PaymentMode, PaymentPatch,
};
use studio_db::repositories::FeeLedgerRepository;

use super::error_response;

/// Creates the fee ledger routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/projects/{project_id}/fee", put(set_total_fee))
        .route("/projects/{project_id}/payments", post(add_payment))
        .route(
            "/projects/{project_id}/payments/{payment_id}",
            put(update_payment),
        )
        .route(
            "/projects/{project_id}/payments/{payment_id}",
            delete(delete_payment),
        )
        .route("/projects/{project_id}/ledger", get(get_ledger))
}

/// Request body for setting a project's total fee.
#[derive(Debug, Deserialize)]
pub struct SetFeeRequest {
    /// The agreed fee (must be >= 0).
    pub total_fee: Decimal,
    /// Replacement ledger notes.
    pub notes: Option<String>,
}

/// Request body for recording a payment.
#[derive(Debug, Deserialize)]
pub struct AddPaymentRequest {
    /// Payment amount (must be > 0).
    pub amount: Decimal,
    /// Date the payment was received (YYYY-MM-DD).
    pub payment_date: NaiveDate,
    /// Payment mode: cash, bank_transfer, cheque, upi, card, other.
    pub payment_mode: String,
    /// Bank account the payment landed in.
    pub bank_account: Option<String>,
    /// External reference (cheque number, UTR, ...).
    pub reference_number: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Request body for updating a payment. Absent fields are unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdatePaymentRequest {
    /// New amount.
    pub amount: Option<Decimal>,
    /// New payment date.
    pub payment_date: Option<NaiveDate>,
    /// New payment mode.
    pub payment_mode: Option<String>,
    /// New bank account.
    pub bank_account: Option<String>,
    /// New reference.
    pub reference_number: Option<String>,
    /// New notes.
    pub notes: Option<String>,
}

/// Response for the derived ledger totals.
#[derive(Debug, Serialize)]
pub struct TotalsResponse {
    /// The project's agreed fee.
    pub total_fee: String,
    /// Sum of all current payments.
    pub received_amount: String,
    /// `total_fee - received_amount`, unclamped.
    pub pending_amount: String,
}

impl From<LedgerTotals> for TotalsResponse {
    fn from(totals: LedgerTotals) -> Self {
        Self {
            total_fee: totals.total_fee.to_string(),
            received_amount: totals.received_amount.to_string(),
            pending_amount: totals.pending_amount.to_string(),
        }
    }
}

/// Response for one payment.
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    /// Payment ID.
    pub id: Uuid,
    /// Payment amount.
    pub amount: String,
    /// Date the payment was received.
    pub payment_date: NaiveDate,
    /// Payment mode.
    pub payment_mode: String,
    /// Bank account.
    pub bank_account: Option<String>,
    /// External reference.
    pub reference_number: Option<String>,
    /// Notes.
    pub notes: Option<String>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            amount: payment.amount.to_string(),
            payment_date: payment.payment_date,
            payment_mode: payment.payment_mode.to_string(),
            bank_account: payment.bank_account,
            reference_number: payment.reference_number,
            notes: payment.notes,
        }
    }
}

/// Response for the full ledger view.
#[derive(Debug, Serialize)]
pub struct LedgerResponse {
    /// The project.
    pub project_id: Uuid,
    /// Derived totals.
    #[serde(flatten)]
    pub totals: TotalsResponse,
    /// Ledger notes.
    pub notes: Option<String>,
    /// Payments sorted by payment date descending.
    pub payments: Vec<PaymentResponse>,
}

impl From<LedgerSnapshot> for LedgerResponse {
    fn from(snapshot: LedgerSnapshot) -> Self {
        Self {
            project_id: snapshot.project_id,
            totals: snapshot.totals.into(),
            notes: snapshot.notes,
            payments: snapshot.payments.into_iter().map(Into::into).collect(),
        }
    }
}

fn ledger_error(e: &LedgerError) -> axum::response::Response {
    error_response(e.http_status_code(), e.error_code(), &e.to_string())
}

pub(crate) fn parse_mode(s: &str) -> Result<PaymentMode, axum::response::Response> {
    s.parse::<PaymentMode>().map_err(|_| {
        let e = LedgerError::InvalidMode(s.to_string());
        ledger_error(&e)
    })
}

/// PUT `/projects/{project_id}/fee` - Set the project's total fee.
async fn set_total_fee(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(payload): Json<SetFeeRequest>,
) -> impl IntoResponse {
    let repo = FeeLedgerRepository::new((*state.db).clone());

    match repo
        .set_total_fee(project_id, payload.total_fee, payload.notes)
        .await
    {
        Ok(snapshot) => {
            info!(
                project_id = %project_id,
                total_fee = %snapshot.totals.total_fee,
                "Total fee set"
            );
            Json(LedgerResponse::from(snapshot)).into_response()
        }
        Err(e) => {
            error!(error = %e, project_id = %project_id, "Failed to set total fee");
            ledger_error(&e)
        }
    }
}

/// POST `/projects/{project_id}/payments` - Record a payment.
async fn add_payment(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(payload): Json<AddPaymentRequest>,
) -> impl IntoResponse {
    let payment_mode = match parse_mode(&payload.payment_mode) {
        Ok(mode) => mode,
        Err(response) => return response,
    };

    let repo = FeeLedgerRepository::new((*state.db).clone());
    let input = PaymentInput {
        amount: payload.amount,
        payment_date: payload.payment_date,
        payment_mode,
        bank_account: payload.bank_account,
        reference_number: payload.reference_number,
        notes: payload.notes,
    };

    match repo.add_payment(project_id, input).await {
        Ok((payment_id, totals)) => {
            info!(
                project_id = %project_id,
                payment_id = %payment_id,
                received = %totals.received_amount,
                "Payment recorded"
            );
            (
                StatusCode::CREATED,
                Json(json!({
                    "payment_id": payment_id,
                    "totals": TotalsResponse::from(totals)
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, project_id = %project_id, "Failed to record payment");
            ledger_error(&e)
        }
    }
}

/// PUT `/projects/{project_id}/payments/{payment_id}` - Update a payment.
async fn update_payment(
    State(state): State<AppState>,
    Path((project_id, payment_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdatePaymentRequest>,
) -> impl IntoResponse {
    let payment_mode = match payload.payment_mode.as_deref().map(parse_mode) {
        Some(Ok(mode)) => Some(mode),
        Some(Err(response)) => return response,
        None => None,
    };

    let repo = FeeLedgerRepository::new((*state.db).clone());
    let patch = PaymentPatch {
        amount: payload.amount,
        payment_date: payload.payment_date,
        payment_mode,
        bank_account: payload.bank_account,
        reference_number: payload.reference_number,
        notes: payload.notes,
    };

    match repo.update_payment(project_id, payment_id, patch).await {
        Ok(totals) => {
            info!(
                project_id = %project_id,
                payment_id = %payment_id,
                received = %totals.received_amount,
                "Payment updated"
            );
            Json(json!({ "totals": TotalsResponse::from(totals) })).into_response()
        }
        Err(e) => {
            error!(error = %e, payment_id = %payment_id, "Failed to update payment");
            ledger_error(&e)
        }
    }
}

/// DELETE `/projects/{project_id}/payments/{payment_id}` - Delete a payment.
async fn delete_payment(
    State(state): State<AppState>,
    Path((project_id, payment_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    let repo = FeeLedgerRepository::new((*state.db).clone());

    match repo.delete_payment(project_id, payment_id).await {
        Ok(totals) => {
            info!(
                project_id = %project_id,
                payment_id = %payment_id,
                received = %totals.received_amount,
                "Payment deleted"
            );
            Json(json!({ "totals": TotalsResponse::from(totals) })).into_response()
        }
        Err(e) => {
            error!(error = %e, payment_id = %payment_id, "Failed to delete payment");
            ledger_error(&e)
        }
    }
}

/// GET `/projects/{project_id}/ledger` - Full ledger view.
async fn get_ledger(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = FeeLedgerRepository::new((*state.db).clone());

    match repo.get_ledger(project_id).await {
        Ok(snapshot) => Json(LedgerResponse::from(snapshot)).into_response(),
        Err(e) => ledger_error(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[rstest]
    #[case("cash", PaymentMode::Cash)]
    #[case("bank_transfer", PaymentMode::BankTransfer)]
    #[case("cheque", PaymentMode::Cheque)]
    #[case("upi", PaymentMode::Upi)]
    #[case("card", PaymentMode::Card)]
    #[case("other", PaymentMode::Other)]
    fn test_parse_mode_accepts_known_modes(#[case] input: &str, #[case] expected: PaymentMode) {
        assert_eq!(parse_mode(input).unwrap(), expected);
    }

    #[test]
    fn test_parse_mode_rejects_unknown() {
        let response = parse_mode("wire").unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_totals_response_renders_exact_strings() {
        let totals = LedgerTotals::new(
            Decimal::from_str("100000.00").unwrap(),
            Decimal::from_str("40000").unwrap(),
        );
        let response = TotalsResponse::from(totals);
        assert_eq!(response.total_fee, "100000.00");
        assert_eq!(response.received_amount, "40000");
        assert_eq!(response.pending_amount, "60000.00");
    }
}
