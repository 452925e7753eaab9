//! Bank account lookup handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use crate::form::BankAccount;

use super::super::state::AppState;
use super::ApiError;

/// GET /api/accounts - all selectable bank accounts.
pub async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BankAccount>>, ApiError> {
    state
        .accounts
        .list()
        .await
        .map(Json)
        .map_err(|e| ApiError::new(StatusCode::BAD_GATEWAY, e.to_string()))
}

/// GET /api/accounts/:id - one account's branch, number, cheque and currency.
pub async fn lookup(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BankAccount>, ApiError> {
    state
        .accounts
        .lookup(&id)
        .await
        .map_err(|e| ApiError::new(StatusCode::BAD_GATEWAY, e.to_string()))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Bank account '{}' not found", id)))
}
