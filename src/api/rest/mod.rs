//! REST endpoints used by the scoring client
//!
//! - `POST /estatistica` - record a stat
//! - `GET /estatisticas` - live events of a game
//! - `POST /desfazer` - undo the last stat of a game
//! - `GET /dashboard` - totals and leaders of a game
//! - `GET /jogadoras`, `GET /jogos` - read-only directory listings

pub mod dashboard;
pub mod directory;
pub mod stats;
pub mod undo;

use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::error::ScoreError;
use crate::types::{GameId, StatEvent};

/// `?jogo_id=ID`
#[derive(Debug, Deserialize)]
pub struct GameQuery {
    pub jogo_id: Option<GameId>,
}

impl GameQuery {
    pub fn require(&self) -> Result<GameId, ApiError> {
        self.jogo_id
            .ok_or_else(|| ApiError::bad_request("jogo_id is required"))
    }
}

/// Confirmation for a mutation
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub message: &'static str,
    #[serde(rename = "evento")]
    pub event: StatEvent,
}

/// Run a blocking scoreboard call off the async executor
///
/// Journal writes sync to disk, so mutations never run on a runtime worker.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ScoreError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::internal(format!("task failed: {}", e)))?
        .map_err(ApiError::from)
}
