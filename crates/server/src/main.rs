use std::{net::SocketAddr, sync::Arc};

use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use catalog::CatalogService;
use server_api::{CallbackRegistry, DispatchBridge};
use shared::protocol::{
    AckResponse, ACTIONS_ROUTE, EXPRESSION_ROUTE, PLAY_ROUTE, SESSION_ROUTE, SOUND_ROUTE,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;
mod session;

use app_state::AppState;
use config::{load_settings, prepare_resources_root};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let resources_root = prepare_resources_root(&settings.resources_root)?;
    if !resources_root.is_dir() {
        warn!(
            root = %resources_root.display(),
            "resources root not found; the catalog will be empty until it exists"
        );
    }

    let registry = Arc::new(CallbackRegistry::new());
    let state = AppState {
        catalog: CatalogService::new(resources_root),
        bridge: DispatchBridge::new(registry),
    };
    let app = build_router(Arc::new(state), settings.max_body_bytes);

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn build_router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(api::healthz))
        .route(ACTIONS_ROUTE, get(api::list_actions))
        .route(PLAY_ROUTE, post(api::play_motion))
        .route(EXPRESSION_ROUTE, post(api::play_expression))
        .route(SOUND_ROUTE, post(api::play_sound))
        .route(SESSION_ROUTE, get(session::ws_handler))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(middleware::map_response(reject_oversized_body))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn reject_oversized_body(response: Response) -> Response {
    if response.status() != StatusCode::PAYLOAD_TOO_LARGE {
        return response;
    }
    warn!("rejected oversized request body");
    (
        StatusCode::PAYLOAD_TOO_LARGE,
        Json(AckResponse::rejected("Invalid request")),
    )
        .into_response()
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
