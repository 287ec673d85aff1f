//! Stat endpoints

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use super::{blocking, GameQuery, MutationResponse};
use crate::api::error::ApiError;
use crate::api::websocket::{AppState, FeedEvent};
use crate::types::{GameId, PlayerId, StatEvent};

/// Body of `POST /estatistica`
#[derive(Debug, Deserialize)]
pub struct RecordRequest {
    pub id_jogadora: PlayerId,
    pub id_jogo: GameId,
    pub tipo: String,
}

/// POST /estatistica - record one play
pub async fn record_stat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RecordRequest>, JsonRejection>,
) -> Result<Json<MutationResponse>, ApiError> {
    let Json(request) = payload?;

    let scoreboard = Arc::clone(&state.scoreboard);
    let change = blocking(move || {
        scoreboard.record_change(request.id_jogo, request.id_jogadora, &request.tipo)
    })
    .await?;

    let event = change.event.clone();
    state.publish(FeedEvent::recorded(change));

    Ok(Json(MutationResponse {
        message: "Estatística registrada com sucesso!",
        event,
    }))
}

/// GET /estatisticas?jogo_id=ID - live events in sequence order
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    params: Result<Query<GameQuery>, QueryRejection>,
) -> Result<Json<Vec<StatEvent>>, ApiError> {
    let Query(params) = params?;
    let game_id = params.require()?;

    Ok(Json(state.scoreboard.live_events(game_id)?))
}
