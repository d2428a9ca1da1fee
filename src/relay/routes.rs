//! Relay routes: POST /api/mint plus health.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::MintError;
use crate::mint::{MintDispatcher, MintRequest, MintStatus};

#[derive(Clone)]
pub struct RelayState {
    pub dispatcher: Arc<MintDispatcher>,
    /// Contract the relay mints against.
    pub contract_address: String,
    /// Payload passed to the mint operation (token URI in the source dapps).
    pub payload: Vec<u8>,
    pub service: String,
}

pub fn create_router(state: RelayState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/mint", post(mint))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MintBody {
    wallet_address: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MintOk {
    success: bool,
    tx_hash: String,
}

#[derive(Serialize)]
struct MintErr {
    error: String,
}

async fn health(State(s): State<RelayState>) -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok", "service": s.service}))
}

async fn mint(
    State(s): State<RelayState>,
    Json(body): Json<MintBody>,
) -> Result<Json<MintOk>, (StatusCode, Json<MintErr>)> {
    let raw = body.wallet_address.unwrap_or_default();
    if raw.trim().is_empty() {
        return Err(bad_request("walletAddress missing"));
    }
    let recipient = raw
        .parse()
        .map_err(|_| bad_request("walletAddress is not a valid address"))?;

    let request = MintRequest {
        recipient,
        contract_address: s.contract_address.clone(),
        payload: s.payload.clone(),
    };

    let pending = s.dispatcher.mint(&request).await.map_err(internal)?;
    match pending.confirm().await {
        MintStatus::Success { tx_id } | MintStatus::Pending { tx_id } => Ok(Json(MintOk {
            success: true,
            tx_hash: tx_id,
        })),
        MintStatus::Failed { reason } => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MintErr { error: reason }),
        )),
    }
}

fn bad_request(msg: &str) -> (StatusCode, Json<MintErr>) {
    (
        StatusCode::BAD_REQUEST,
        Json(MintErr { error: msg.into() }),
    )
}

fn internal(err: MintError) -> (StatusCode, Json<MintErr>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(MintErr {
            error: err.to_string(),
        }),
    )
}
