//! Roster and game directory
//!
//! Players and games are owned by an external collaborator. The scoring core
//! only asks whether an id exists and what a player is called, through the
//! `Directory` trait. `StaticDirectory` is the in-process implementation,
//! seeded from a JSON file or the built-in roster.

mod seed;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{GameId, PlayerId};

pub use seed::{DirectoryError, DirectorySeed, StaticDirectory, DEFAULT_ROSTER};

/// Roster member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    #[serde(rename = "nome")]
    pub name: String,
}

/// Game metadata, immutable once created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(rename = "local")]
    pub location: String,
    #[serde(rename = "horario")]
    pub time: String,
    #[serde(rename = "adversario")]
    pub opponent: String,
    #[serde(rename = "categoria")]
    pub category: String,
}

/// Read-only view of the external roster/game collaborator
pub trait Directory: Send + Sync {
    fn player(&self, id: PlayerId) -> Option<Player>;

    fn game(&self, id: GameId) -> Option<Game>;

    /// All players, ordered by id
    fn players(&self) -> Vec<Player>;

    /// All games, ordered by id
    fn games(&self) -> Vec<Game>;

    fn has_game(&self, id: GameId) -> bool {
        self.game(id).is_some()
    }

    fn has_player(&self, id: PlayerId) -> bool {
        self.player(id).is_some()
    }

    /// Display name, or `#<id>` for players no longer on the roster
    fn display_name(&self, id: PlayerId) -> String {
        self.player(id)
            .map(|p| p.name)
            .unwrap_or_else(|| format!("#{}", id))
    }
}
