//! HTTP server setup with Axum

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::rest::{dashboard, directory, stats, undo};
use super::websocket::{handler::ws_handler, state::AppState};

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    // Scoring tables run from arbitrary origins on the gym network
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Live feed
        .route("/ws", get(ws_handler))
        // Health check
        .route("/health", get(health_check))
        // Scoring
        .route("/estatistica", post(stats::record_stat))
        .route("/estatisticas", get(stats::list_events))
        .route("/desfazer", post(undo::undo_last))
        .route("/dashboard", get(dashboard::get_dashboard))
        // Directory (read-only)
        .route("/jogadoras", get(directory::list_players))
        .route("/jogos", get(directory::list_games))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
