use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Extension;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::{AppError, Json};
use crate::models::account::{self, Account};
use crate::store::NewAccount;
use crate::AppState;

// ── Request / Response DTOs ──────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub number: i64,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub number: i64,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub to_account: i64,
    pub amount: i64,
}

/// Attempts at regenerating a colliding account number before giving up.
const CREATE_RETRIES: usize = 5;

// ── Handlers ─────────────────────────────────────────────────

/// GET /account — list all accounts
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Account>>, AppError> {
    Ok(Json(state.db.get_accounts().await?))
}

/// GET /account/:id — the ownership gate has already validated the token,
/// resolved the account, and checked the number match.
pub async fn get_account(Extension(account): Extension<Account>) -> Json<Account> {
    Json(account)
}

/// POST /account — create an account with a hashed password and a
/// randomly assigned account number.
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateAccountRequest>,
) -> Result<Json<Account>, AppError> {
    let password_hash = account::hash_password(&payload.password)?;

    for _ in 0..CREATE_RETRIES {
        let new = NewAccount {
            first_name: payload.first_name.clone(),
            last_name: payload.last_name.clone(),
            number: account::random_account_number(),
            password_hash: password_hash.clone(),
        };
        match state.db.create_account(new).await {
            Ok(created) => {
                tracing::info!(id = created.id, number = created.number, "account created");
                return Ok(Json(created));
            }
            Err(AppError::DuplicateNumber) => continue,
            Err(e) => return Err(e),
        }
    }
    Err(AppError::DuplicateNumber)
}

/// DELETE /account/:id
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = super::parse_account_id(&raw_id)?;
    state.db.delete_account(id).await?;
    Ok(Json(json!({ "deleted": id })))
}

/// POST /login — authenticate by account number and password, then
/// issue a signed token asserting that number.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    // An unknown number fails authentication immediately,
    // indistinguishable from a wrong password.
    let account = match state.db.get_account_by_number(payload.number).await {
        Ok(a) => a,
        Err(AppError::AccountNotFound) => return Err(AppError::NotAuthenticated),
        Err(e) => return Err(e),
    };

    if !account.verify_password(&payload.password) {
        return Err(AppError::NotAuthenticated);
    }

    let token = state.signer.issue(&account)?;
    Ok(Json(LoginResponse {
        token,
        number: account.number,
    }))
}

/// POST /transfer — echo-only stub. No debit/credit semantics are
/// defined yet; the request is validated and returned as-is.
pub async fn transfer(Json(payload): Json<TransferRequest>) -> Json<TransferRequest> {
    Json(payload)
}
