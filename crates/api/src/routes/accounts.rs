//! Account routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tally_shared::types::ClientId;
use tracing::info;

use crate::{AppState, error::ledger_error_response};

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", post(create_account))
        .route("/accounts/{client_id}", get(get_account))
}

/// Request body for opening an account.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// Owning client.
    pub client_id: ClientId,
    /// Opening balance; must not be negative.
    #[serde(alias = "amount_available")]
    pub balance: Decimal,
}

/// POST `/accounts` - Open the account of a client.
async fn create_account(
    State(state): State<AppState>,
    Json(payload): Json<CreateAccountRequest>,
) -> impl IntoResponse {
    match state
        .ledger
        .create_account(payload.client_id, payload.balance)
        .await
    {
        Ok(account) => {
            info!(client_id = %account.client_id, balance = %account.balance, "Account created");
            (StatusCode::CREATED, Json(json!(account))).into_response()
        }
        Err(e) => ledger_error_response(&e),
    }
}

/// GET `/accounts/{client_id}` - Balance with optional currency projection.
async fn get_account(
    State(state): State<AppState>,
    Path(client_id): Path<ClientId>,
) -> impl IntoResponse {
    match state
        .ledger
        .account_view(client_id, state.quotes.as_deref())
        .await
    {
        Ok(view) => (StatusCode::OK, Json(json!(view))).into_response(),
        Err(e) => ledger_error_response(&e),
    }
}
