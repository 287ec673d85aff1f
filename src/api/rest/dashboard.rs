//! Dashboard endpoint

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};

use super::GameQuery;
use crate::api::error::ApiError;
use crate::api::websocket::AppState;
use crate::types::Dashboard;

/// GET /dashboard?jogo_id=ID - totals and leaders
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    params: Result<Query<GameQuery>, QueryRejection>,
) -> Result<Json<Dashboard>, ApiError> {
    let Query(params) = params?;
    let game_id = params.require()?;

    Ok(Json(state.scoreboard.dashboard(game_id)?))
}
