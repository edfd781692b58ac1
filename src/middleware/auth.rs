//! Token issuing and the account-ownership gate.
//!
//! A login token is an HS256 JWT asserting one account number. The gate
//! wraps `GET /account/:id` and admits a request only when the token's
//! asserted number matches the number of the account the path resolves to.
//! Every request re-runs the full check; decisions are never cached.

use std::sync::Arc;

use axum::extract::{Path, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::api::parse_account_id;
use crate::errors::AppError;
use crate::models::account::Account;
use crate::AppState;

/// Request header carrying the signed token.
pub const TOKEN_HEADER: &str = "x-jwt-token";

/// Claim set embedded in issued tokens. Strongly typed: the account
/// number is an integer claim, expiry is a unix timestamp.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "accountNumber")]
    pub account_number: i64,
    pub exp: i64,
}

/// Issues and validates login tokens. The secret is injected at
/// construction; nothing here reads the environment.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Sign a token asserting the account's number.
    /// The caller must have authenticated the account already.
    pub fn issue(&self, account: &Account) -> Result<String, AppError> {
        let claims = Claims {
            account_number: account.number,
            exp: (Utc::now() + self.ttl).timestamp(),
        };
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok(token)
    }

    /// Validate signature and expiry, returning the embedded claims.
    /// Only HS256 is accepted; a token naming any other algorithm fails
    /// validation outright, which closes the algorithm-substitution hole.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let validation = Validation::new(Algorithm::HS256);
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }
}

/// Middleware guarding `GET /account/:id`.
///
/// Three ordered checks, each an exit point:
/// 1. validate the token from the request header — any parse, signature,
///    or expiry failure yields the same 403 denial;
/// 2. parse the path id — malformed ids are a 400 client error, decided
///    before any store call;
/// 3. resolve the target account and compare its number against the
///    token's claim — mismatch is a 403, not-found and store errors
///    propagate as themselves.
///
/// On success the resolved account is stashed in request extensions so
/// the handler does not fetch it a second time.
pub async fn account_owner_gate(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::PermissionDenied)?;

    // Collapse all token failures into one denial; the reason stays in logs.
    let claims = state.signer.verify(token).map_err(|e| {
        tracing::warn!("token rejected: {}", e);
        AppError::PermissionDenied
    })?;

    let id = parse_account_id(&raw_id)?;

    let account = state.db.get_account_by_id(id).await?;
    if account.number != claims.account_number {
        tracing::warn!(
            account_id = id,
            "token for number {} denied access to account {}",
            claims.account_number,
            account.number
        );
        return Err(AppError::PermissionDenied);
    }

    req.extensions_mut().insert(account);
    Ok(next.run(req).await)
}
