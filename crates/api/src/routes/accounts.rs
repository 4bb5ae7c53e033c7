//! Income/expense account routes.
//!
//! Both kinds share one set of handlers; the kind comes from the path
//! (`/accounts/income/...`, `/accounts/expense/...`).

use axum::{
    Json, Router,
    extract::{Path, Query, State},
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
use studio_core::accounts::{AccountError, AccountKind, Entry, EntryInput, EntryPatch};
use studio_db::repositories::AccountRepository;

use super::error_response;
use super::ledger::parse_mode;

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts/{kind}", post(create_account))
        .route("/accounts/{kind}", get(list_accounts))
        .route("/accounts/{kind}/{account_id}", put(update_account))
        .route("/accounts/{kind}/{account_id}", delete(delete_account))
        .route("/accounts/{kind}/{account_id}/entries", post(add_entry))
        .route("/accounts/{kind}/entries", get(list_entries))
        .route("/accounts/{kind}/entries/{entry_id}", put(update_entry))
        .route("/accounts/{kind}/entries/{entry_id}", delete(delete_entry))
}

/// Request body for creating an account.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// Account name, unique within the kind.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
}

/// Request body for updating an account. Absent fields are unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateAccountRequest {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
}

/// Request body for recording an entry.
#[derive(Debug, Deserialize)]
pub struct AddEntryRequest {
    /// Entry amount (must be > 0).
    pub amount: Decimal,
    /// Date of the income/expense.
    pub entry_date: NaiveDate,
    /// What the entry was for.
    pub description: String,
    /// Payment mode: cash, bank_transfer, cheque, upi, card, other.
    pub payment_mode: String,
    /// Bank account involved.
    pub bank_account: Option<String>,
    /// External reference.
    pub reference_number: Option<String>,
    /// Source name (income) or vendor name (expense).
    pub counterpart_name: Option<String>,
    /// Project attribution (expense entries only).
    pub project_id: Option<Uuid>,
}

/// Request body for updating an entry. Absent fields are unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateEntryRequest {
    /// New amount.
    pub amount: Option<Decimal>,
    /// New entry date.
    pub entry_date: Option<NaiveDate>,
    /// New description.
    pub description: Option<String>,
    /// New payment mode.
    pub payment_mode: Option<String>,
    /// New bank account.
    pub bank_account: Option<String>,
    /// New reference.
    pub reference_number: Option<String>,
    /// New counterpart name.
    pub counterpart_name: Option<String>,
}

/// Query parameters for listing entries.
#[derive(Debug, Deserialize)]
pub struct ListEntriesQuery {
    /// Restrict to one account.
    pub account_id: Option<Uuid>,
}

/// Response for one entry.
#[derive(Debug, Serialize)]
pub struct EntryResponse {
    /// Entry ID.
    pub id: Uuid,
    /// The account this entry belongs to.
    pub account_id: Uuid,
    /// Entry amount.
    pub amount: String,
    /// Date of the income/expense.
    pub entry_date: NaiveDate,
    /// What the entry was for.
    pub description: String,
    /// Payment mode.
    pub payment_mode: String,
    /// Bank account involved.
    pub bank_account: Option<String>,
    /// External reference.
    pub reference_number: Option<String>,
    /// Source name (income) or vendor name (expense).
    pub counterpart_name: Option<String>,
    /// Project attribution.
    pub project_id: Option<Uuid>,
}

impl From<Entry> for EntryResponse {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id,
            account_id: entry.account_id,
            amount: entry.amount.to_string(),
            entry_date: entry.entry_date,
            description: entry.description,
            payment_mode: entry.payment_mode.to_string(),
            bank_account: entry.bank_account,
            reference_number: entry.reference_number,
            counterpart_name: entry.counterpart_name,
            project_id: entry.project_id,
        }
    }
}

fn account_error(e: &AccountError) -> axum::response::Response {
    error_response(e.http_status_code(), e.error_code(), &e.to_string())
}

fn parse_kind(s: &str) -> Result<AccountKind, axum::response::Response> {
    s.parse::<AccountKind>().map_err(|_| {
        error_response(
            400,
            "INVALID_KIND",
            "Invalid account kind. Must be one of: income, expense",
        )
    })
}

/// POST `/accounts/{kind}` - Create an account.
async fn create_account(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(payload): Json<CreateAccountRequest>,
) -> impl IntoResponse {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(response) => return response,
    };

    let repo = AccountRepository::new((*state.db).clone());

    match repo
        .create_account(kind, payload.name, payload.description)
        .await
    {
        Ok(account) => {
            info!(account_id = %account.id, kind = %kind, name = %account.name, "Account created");
            (StatusCode::CREATED, Json(account)).into_response()
        }
        Err(e) => {
            error!(error = %e, kind = %kind, "Failed to create account");
            account_error(&e)
        }
    }
}

/// GET `/accounts/{kind}` - List accounts with their totals.
async fn list_accounts(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> impl IntoResponse {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(response) => return response,
    };

    let repo = AccountRepository::new((*state.db).clone());

    match repo.get_account_totals(kind).await {
        Ok(totals) => {
            let accounts: Vec<serde_json::Value> = totals
                .into_iter()
                .map(|t| {
                    json!({
                        "id": t.account.id,
                        "kind": t.account.kind,
                        "name": t.account.name,
                        "description": t.account.description,
                        "total": t.total.to_string(),
                    })
                })
                .collect();
            Json(json!({ "accounts": accounts })).into_response()
        }
        Err(e) => {
            error!(error = %e, kind = %kind, "Failed to list accounts");
            account_error(&e)
        }
    }
}

/// PUT `/accounts/{kind}/{account_id}` - Rename or re-describe an account.
async fn update_account(
    State(state): State<AppState>,
    Path((kind, account_id)): Path<(String, Uuid)>,
    Json(payload): Json<UpdateAccountRequest>,
) -> impl IntoResponse {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(response) => return response,
    };

    let repo = AccountRepository::new((*state.db).clone());

    match repo
        .update_account(kind, account_id, payload.name, payload.description)
        .await
    {
        Ok(account) => {
            info!(account_id = %account.id, name = %account.name, "Account updated");
            Json(account).into_response()
        }
        Err(e) => {
            error!(error = %e, account_id = %account_id, "Failed to update account");
            account_error(&e)
        }
    }
}

/// DELETE `/accounts/{kind}/{account_id}` - Delete an empty account.
async fn delete_account(
    State(state): State<AppState>,
    Path((kind, account_id)): Path<(String, Uuid)>,
) -> impl IntoResponse {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(response) => return response,
    };

    let repo = AccountRepository::new((*state.db).clone());

    match repo.delete_account(kind, account_id).await {
        Ok(()) => {
            info!(account_id = %account_id, kind = %kind, "Account deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, account_id = %account_id, "Failed to delete account");
            account_error(&e)
        }
    }
}

/// POST `/accounts/{kind}/{account_id}/entries` - Record an entry.
async fn add_entry(
    State(state): State<AppState>,
    Path((kind, account_id)): Path<(String, Uuid)>,
    Json(payload): Json<AddEntryRequest>,
) -> impl IntoResponse {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(response) => return response,
    };
    let payment_mode = match parse_mode(&payload.payment_mode) {
        Ok(mode) => mode,
        Err(response) => return response,
    };

    let repo = AccountRepository::new((*state.db).clone());
    let input = EntryInput {
        amount: payload.amount,
        entry_date: payload.entry_date,
        description: payload.description,
        payment_mode,
        bank_account: payload.bank_account,
        reference_number: payload.reference_number,
        counterpart_name: payload.counterpart_name,
        project_id: payload.project_id,
    };

    match repo.add_entry(kind, account_id, input).await {
        Ok((entry_id, total)) => {
            info!(
                account_id = %account_id,
                entry_id = %entry_id,
                total = %total,
                "Entry recorded"
            );
            (
                StatusCode::CREATED,
                Json(json!({
                    "entry_id": entry_id,
                    "account_total": total.to_string()
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, account_id = %account_id, "Failed to record entry");
            account_error(&e)
        }
    }
}

/// GET `/accounts/{kind}/entries` - List entries, newest first.
async fn list_entries(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(query): Query<ListEntriesQuery>,
) -> impl IntoResponse {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(response) => return response,
    };

    let repo = AccountRepository::new((*state.db).clone());

    match repo.list_entries(kind, query.account_id).await {
        Ok(entries) => {
            let entries: Vec<EntryResponse> = entries.into_iter().map(Into::into).collect();
            Json(json!({ "entries": entries })).into_response()
        }
        Err(e) => {
            error!(error = %e, kind = %kind, "Failed to list entries");
            account_error(&e)
        }
    }
}

/// PUT `/accounts/{kind}/entries/{entry_id}` - Update an entry.
async fn update_entry(
    State(state): State<AppState>,
    Path((kind, entry_id)): Path<(String, Uuid)>,
    Json(payload): Json<UpdateEntryRequest>,
) -> impl IntoResponse {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(response) => return response,
    };
    let payment_mode = match payload.payment_mode.as_deref().map(parse_mode) {
        Some(Ok(mode)) => Some(mode),
        Some(Err(response)) => return response,
        None => None,
    };

    let repo = AccountRepository::new((*state.db).clone());
    let patch = EntryPatch {
        amount: payload.amount,
        entry_date: payload.entry_date,
        description: payload.description,
        payment_mode,
        bank_account: payload.bank_account,
        reference_number: payload.reference_number,
        counterpart_name: payload.counterpart_name,
    };

    match repo.update_entry(kind, entry_id, patch).await {
        Ok(total) => {
            info!(entry_id = %entry_id, total = %total, "Entry updated");
            Json(json!({ "account_total": total.to_string() })).into_response()
        }
        Err(e) => {
            error!(error = %e, entry_id = %entry_id, "Failed to update entry");
            account_error(&e)
        }
    }
}

/// DELETE `/accounts/{kind}/entries/{entry_id}` - Delete an entry.
async fn delete_entry(
    State(state): State<AppState>,
    Path((kind, entry_id)): Path<(String, Uuid)>,
) -> impl IntoResponse {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(response) => return response,
    };

    let repo = AccountRepository::new((*state.db).clone());

    match repo.delete_entry(kind, entry_id).await {
        Ok(total) => {
            info!(entry_id = %entry_id, total = %total, "Entry deleted");
            Json(json!({ "account_total": total.to_string() })).into_response()
        }
        Err(e) => {
            error!(error = %e, entry_id = %entry_id, "Failed to delete entry");
            account_error(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("income", AccountKind::Income)]
    #[case("expense", AccountKind::Expense)]
    fn test_parse_kind_accepts_known_kinds(#[case] input: &str, #[case] expected: AccountKind) {
        assert_eq!(parse_kind(input).unwrap(), expected);
    }

    #[rstest]
    #[case("revenue")]
    #[case("Income")]
    #[case("")]
    fn test_parse_kind_rejects_unknown(#[case] input: &str) {
        let response = parse_kind(input).unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
