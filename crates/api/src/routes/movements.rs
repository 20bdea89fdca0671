//! Movement routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tally_core::ledger::{DetailInput, LedgerError, Movement, MovementDetail};
use tally_shared::types::{ClientId, MovementId};
use tracing::info;

use crate::{AppState, error::ledger_error_response};

/// Creates the movement routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/movements", post(create_movement))
        .route(
            "/movements/{movement_id}",
            get(get_movement).delete(delete_movement),
        )
}

/// Request body for creating a movement.
#[derive(Debug, Deserialize)]
pub struct CreateMovementRequest {
    /// Client whose account is affected.
    pub client_id: ClientId,
    /// Effective date; defaults to now.
    pub date: Option<DateTime<Utc>>,
    /// Detail lines: `{ "amount": .., "type": "ingreso" | "egreso" }`.
    #[serde(default)]
    pub details: Vec<DetailInput>,
}

/// Movement with its computed total.
#[derive(Debug, Serialize)]
pub struct MovementResponse {
    /// Movement ID.
    pub id: MovementId,
    /// Owning client.
    pub client_id: ClientId,
    /// Effective date.
    pub date: DateTime<Utc>,
    /// Detail lines in insertion order.
    pub details: Vec<MovementDetail>,
    /// Sum of all detail amounts.
    pub total: Decimal,
}

impl TryFrom<Movement> for MovementResponse {
    type Error = LedgerError;

    fn try_from(movement: Movement) -> Result<Self, Self::Error> {
        let total = movement.total()?;
        Ok(Self {
            id: movement.id,
            client_id: movement.client_id,
            date: movement.date,
            details: movement.details,
            total,
        })
    }
}

/// POST `/movements` - Create a movement and apply it to the account.
async fn create_movement(
    State(state): State<AppState>,
    Json(payload): Json<CreateMovementRequest>,
) -> impl IntoResponse {
    let created = state
        .ledger
        .create_movement(payload.client_id, payload.date, payload.details)
        .await
        .and_then(MovementResponse::try_from);

    match created {
        Ok(movement) => {
            info!(
                movement_id = %movement.id,
                client_id = %movement.client_id,
                details = movement.details.len(),
                "Movement created"
            );
            (StatusCode::CREATED, Json(json!(movement))).into_response()
        }
        Err(e) => ledger_error_response(&e),
    }
}

/// GET `/movements/{movement_id}` - Get a movement with its details.
async fn get_movement(
    State(state): State<AppState>,
    Path(movement_id): Path<MovementId>,
) -> impl IntoResponse {
    match state
        .ledger
        .get_movement(movement_id)
        .await
        .and_then(MovementResponse::try_from)
    {
        Ok(movement) => (StatusCode::OK, Json(json!(movement))).into_response(),
        Err(e) => ledger_error_response(&e),
    }
}

/// DELETE `/movements/{movement_id}` - Delete a movement and reverse its effect.
async fn delete_movement(
    State(state): State<AppState>,
    Path(movement_id): Path<MovementId>,
) -> impl IntoResponse {
    match state.ledger.delete_movement(movement_id).await {
        Ok(()) => {
            info!(movement_id = %movement_id, "Movement deleted");
            (
                StatusCode::OK,
                Json(json!({ "message": "movement deleted" })),
            )
                .into_response()
        }
        Err(e) => ledger_error_response(&e),
    }
}
