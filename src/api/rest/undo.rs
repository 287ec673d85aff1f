//! Undo endpoint

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;

use super::{blocking, MutationResponse};
use crate::api::error::ApiError;
use crate::api::websocket::{AppState, FeedEvent};
use crate::types::GameId;

/// Body of `POST /desfazer`; the game is always explicit
#[derive(Debug, Deserialize)]
pub struct UndoRequest {
    pub id_jogo: GameId,
}

/// POST /desfazer - undo the newest live stat of a game
pub async fn undo_last(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UndoRequest>, JsonRejection>,
) -> Result<Json<MutationResponse>, ApiError> {
    let Json(request) = payload?;

    let scoreboard = Arc::clone(&state.scoreboard);
    let change = blocking(move || scoreboard.undo_change(request.id_jogo)).await?;

    let event = change.event.clone();
    state.publish(FeedEvent::undone(change));

    Ok(Json(MutationResponse {
        message: "Ação desfeita com sucesso!",
        event,
    }))
}
