//! Read-only roster and game listings

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::api::websocket::AppState;
use crate::directory::{Game, Player};

/// GET /jogadoras
pub async fn list_players(State(state): State<Arc<AppState>>) -> Json<Vec<Player>> {
    Json(state.scoreboard.directory().players())
}

/// GET /jogos
pub async fn list_games(State(state): State<Arc<AppState>>) -> Json<Vec<Game>> {
    Json(state.scoreboard.directory().games())
}
