//! Account and transaction routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use tracing::{error, info};
use validator::Validate;

use crate::AppState;
use teller_ledger::{Account, LedgerError, Transaction, TransactionKind};
use teller_shared::{AccountId, TransactionId};

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts))
        .route("/accounts", post(create_account))
        .route("/accounts/{id}/deposit", post(deposit))
        .route("/accounts/{id}/withdraw", post(withdraw))
        .route("/accounts/{id}/transactions", get(list_transactions))
}

/// Query parameters for listing accounts.
#[derive(Debug, Deserialize)]
pub struct ListAccountsQuery {
    /// Filter by exact owner name.
    pub owner: Option<String>,
}

/// Request body for opening an account.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAccountRequest {
    /// Display name of the account owner.
    #[validate(length(min = 1, message = "owner_name must not be blank"))]
    pub owner_name: String,
    /// Four-digit PIN protecting withdrawals.
    pub pin: String,
}

/// Request body for a deposit.
#[derive(Debug, Deserialize)]
pub struct DepositRequest {
    /// Amount as a decimal string, e.g. `"100.00"`.
    pub amount: String,
}

/// Request body for a withdrawal.
#[derive(Debug, Deserialize)]
pub struct WithdrawRequest {
    /// Amount as a decimal string, e.g. `"40.00"`.
    pub amount: String,
    /// PIN of the account being debited.
    pub pin: String,
}

/// Response for an account. The PIN is never serialized.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: AccountId,
    /// Owner display name.
    pub owner_name: String,
    /// Current balance as a decimal string.
    pub balance: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Response for a committed transaction.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: TransactionId,
    /// Account the transaction belongs to.
    pub account_id: AccountId,
    /// Amount as a decimal string.
    pub amount: String,
    /// DEPOSIT or WITHDRAW.
    pub kind: TransactionKind,
    /// Commit timestamp.
    pub timestamp: DateTime<Utc>,
}

/// GET `/accounts` - List accounts, optionally filtered by owner name.
async fn list_accounts(
    State(state): State<AppState>,
    Query(query): Query<ListAccountsQuery>,
) -> impl IntoResponse {
    let accounts = match query.owner.as_deref() {
        Some(owner) => state.ledger.find_accounts_by_owner(owner),
        None => state.ledger.get_all_accounts(),
    };

    let response: Vec<AccountResponse> = accounts.into_iter().map(account_response).collect();

    (StatusCode::OK, Json(json!({ "accounts": response }))).into_response()
}

/// POST `/accounts` - Open an account with a zero balance.
async fn create_account(
    State(state): State<AppState>,
    Json(payload): Json<CreateAccountRequest>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "VALIDATION_ERROR",
                "message": e.to_string()
            })),
        )
            .into_response();
    }

    match state.ledger.create_account(payload.owner_name, &payload.pin) {
        Ok(account) => {
            info!(
                account_id = %account.id,
                owner = %account.owner_name,
                "Account created"
            );

            (StatusCode::CREATED, Json(account_response(account))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create account");
            error_response(&e)
        }
    }
}

/// POST `/accounts/{id}/deposit` - Credit an account.
async fn deposit(
    State(state): State<AppState>,
    Path(account_id): Path<AccountId>,
    Json(payload): Json<DepositRequest>,
) -> impl IntoResponse {
    let amount = match parse_amount(&payload.amount) {
        Ok(amount) => amount,
        Err(response) => return response,
    };

    match state.ledger.deposit(account_id, amount).await {
        Ok(()) => {
            info!(account_id = %account_id, amount = %amount, "Deposit committed");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(
                account_id = %account_id,
                amount = %amount,
                error = %e,
                "Failed to deposit"
            );
            error_response(&e)
        }
    }
}

/// POST `/accounts/{id}/withdraw` - Debit an account after PIN authentication.
async fn withdraw(
    State(state): State<AppState>,
    Path(account_id): Path<AccountId>,
    Json(payload): Json<WithdrawRequest>,
) -> impl IntoResponse {
    let amount = match parse_amount(&payload.amount) {
        Ok(amount) => amount,
        Err(response) => return response,
    };

    match state.ledger.withdraw(account_id, amount, &payload.pin).await {
        Ok(()) => {
            info!(account_id = %account_id, amount = %amount, "Withdrawal committed");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            // The PIN itself stays out of the logs.
            error!(
                account_id = %account_id,
                amount = %amount,
                error = %e,
                "Failed to withdraw"
            );
            error_response(&e)
        }
    }
}

/// GET `/accounts/{id}/transactions` - Transaction history, oldest first.
async fn list_transactions(
    State(state): State<AppState>,
    Path(account_id): Path<AccountId>,
) -> impl IntoResponse {
    match state.ledger.get_transactions(account_id) {
        Ok(transactions) => {
            let response: Vec<TransactionResponse> =
                transactions.into_iter().map(transaction_response).collect();

            (StatusCode::OK, Json(json!({ "transactions": response }))).into_response()
        }
        Err(e) => {
            error!(account_id = %account_id, error = %e, "Failed to list transactions");
            error_response(&e)
        }
    }
}

// Helper functions

/// Maps a ledger error onto the wire shape `{"error", "message"}`.
///
/// `Internal` faults keep their detail out of the body.
fn error_response(err: &LedgerError) -> Response {
    let status = StatusCode::from_u16(err.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let message = match err {
        LedgerError::Internal(_) => "An error occurred".to_string(),
        _ => err.to_string(),
    };

    (
        status,
        Json(json!({ "error": err.error_code(), "message": message })),
    )
        .into_response()
}

/// Parses a wire amount string into a `Decimal`.
///
/// Only the format is checked at the boundary; sign and magnitude checks
/// live in the ledger.
fn parse_amount(raw: &str) -> Result<Decimal, Response> {
    Decimal::from_str(raw).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "VALIDATION_ERROR",
                "message": "Invalid amount format"
            })),
        )
            .into_response()
    })
}

fn account_response(account: Account) -> AccountResponse {
    AccountResponse {
        id: account.id,
        owner_name: account.owner_name,
        balance: account.balance.to_string(),
        created_at: account.created_at,
    }
}

fn transaction_response(transaction: Transaction) -> TransactionResponse {
    TransactionResponse {
        id: transaction.id,
        account_id: transaction.account_id,
        amount: transaction.amount.to_string(),
        kind: transaction.kind,
        timestamp: transaction.timestamp,
    }
}
