use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use server_api::{DispatchError, DispatchReceipt};
use shared::protocol::{
    AckResponse, ActionsResponse, ACTIONS_ROUTE, EXPRESSION_ROUTE, PLAY_ROUTE, SOUND_ROUTE,
};
use tracing::{error, info, warn};

use crate::app_state::AppState;

pub(crate) async fn healthz() -> &'static str {
    "ok"
}

pub(crate) async fn list_actions(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ActionsResponse>) {
    info!("GET {ACTIONS_ROUTE}");
    let catalog = state.catalog.clone();
    match tokio::task::spawn_blocking(move || catalog.list_resources()).await {
        Ok(data) => (StatusCode::OK, Json(ActionsResponse::ok(data))),
        Err(error) => {
            error!(%error, "resource scan task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ActionsResponse::failed()),
            )
        }
    }
}

pub(crate) async fn play_motion(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> (StatusCode, Json<AckResponse>) {
    info!("POST {PLAY_ROUTE}");
    acknowledge(state.bridge.request_motion_json(&body))
}

pub(crate) async fn play_expression(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> (StatusCode, Json<AckResponse>) {
    info!("POST {EXPRESSION_ROUTE}");
    acknowledge(state.bridge.request_expression_json(&body))
}

pub(crate) async fn play_sound(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> (StatusCode, Json<AckResponse>) {
    info!("POST {SOUND_ROUTE}");
    acknowledge(state.bridge.request_sound_json(&body))
}

/// An unready render session still gets a success-shaped reply; only a
/// malformed request is a client error.
fn acknowledge(
    result: Result<DispatchReceipt, DispatchError>,
) -> (StatusCode, Json<AckResponse>) {
    match result {
        Ok(receipt) => (StatusCode::OK, Json(AckResponse::ok(receipt.detail))),
        Err(error) => {
            warn!(%error, "rejected action request");
            (
                StatusCode::BAD_REQUEST,
                Json(AckResponse::rejected(error.public_message())),
            )
        }
    }
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
