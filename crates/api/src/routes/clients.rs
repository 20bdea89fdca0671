//! Client management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use tally_shared::types::ClientId;
use tracing::info;

use crate::{AppState, error::ledger_error_response};

/// Creates the client routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/clients", get(list_clients).post(create_client))
        .route(
            "/clients/{client_id}",
            get(get_client).put(rename_client).delete(delete_client),
        )
}

/// Request body for creating or renaming a client.
#[derive(Debug, Deserialize)]
pub struct ClientRequest {
    /// Letters only.
    pub name: String,
}

/// GET `/clients` - List all clients.
async fn list_clients(State(state): State<AppState>) -> impl IntoResponse {
    match state.ledger.list_clients().await {
        Ok(clients) => (StatusCode::OK, Json(json!(clients))).into_response(),
        Err(e) => ledger_error_response(&e),
    }
}

/// POST `/clients` - Create a client.
async fn create_client(
    State(state): State<AppState>,
    Json(payload): Json<ClientRequest>,
) -> impl IntoResponse {
    match state.ledger.create_client(&payload.name).await {
        Ok(client) => {
            info!(client_id = %client.id, "Client created");
            (StatusCode::CREATED, Json(json!(client))).into_response()
        }
        Err(e) => ledger_error_response(&e),
    }
}

/// GET `/clients/{client_id}` - Get a client.
async fn get_client(
    State(state): State<AppState>,
    Path(client_id): Path<ClientId>,
) -> impl IntoResponse {
    match state.ledger.get_client(client_id).await {
        Ok(client) => (StatusCode::OK, Json(json!(client))).into_response(),
        Err(e) => ledger_error_response(&e),
    }
}

/// PUT `/clients/{client_id}` - Rename a client.
async fn rename_client(
    State(state): State<AppState>,
    Path(client_id): Path<ClientId>,
    Json(payload): Json<ClientRequest>,
) -> impl IntoResponse {
    match state.ledger.rename_client(client_id, &payload.name).await {
        Ok(client) => {
            info!(client_id = %client.id, "Client renamed");
            (StatusCode::OK, Json(json!(client))).into_response()
        }
        Err(e) => ledger_error_response(&e),
    }
}

/// DELETE `/clients/{client_id}` - Delete a client with its account and movements.
async fn delete_client(
    State(state): State<AppState>,
    Path(client_id): Path<ClientId>,
) -> impl IntoResponse {
    match state.ledger.delete_client(client_id).await {
        Ok(()) => {
            info!(client_id = %client_id, "Client deleted");
            (
                StatusCode::OK,
                Json(json!({ "message": "client deleted" })),
            )
                .into_response()
        }
        Err(e) => ledger_error_response(&e),
    }
}
