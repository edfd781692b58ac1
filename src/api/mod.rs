use std::sync::Arc;

use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::errors::AppError;
use crate::middleware::auth::account_owner_gate;
use crate::AppState;

pub mod handlers;

/// Build the API router. The ownership gate is layered onto
/// `GET /account/:id` only; every other route is open.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route(
            "/account",
            get(handlers::list_accounts).post(handlers::create_account),
        )
        .route(
            "/account/:id",
            get(handlers::get_account)
                // route_layer applies to methods added so far, so DELETE
                // below stays ungated.
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    account_owner_gate,
                ))
                .delete(handlers::delete_account),
        )
        .route("/login", post(handlers::login))
        .route("/transfer", post(handlers::transfer))
        .fallback(fallback_404)
        .with_state(state)
}

async fn fallback_404() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Parse a path id as a non-negative integer.
pub(crate) fn parse_account_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id >= 0)
        .ok_or_else(|| AppError::InvalidId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_account_id_accepts_non_negative_integers() {
        assert_eq!(parse_account_id("0").unwrap(), 0);
        assert_eq!(parse_account_id("7").unwrap(), 7);
    }

    #[test]
    fn parse_account_id_rejects_malformed_input() {
        for raw in ["abc", "-1", "1.5", "", "7x"] {
            assert!(matches!(
                parse_account_id(raw),
                Err(AppError::InvalidId(_))
            ));
        }
    }
}
