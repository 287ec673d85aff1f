//! In-process directory seeded from JSON

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{Directory, Game, Player};
use crate::types::{GameId, PlayerId};

/// Roster used when no seed file is configured
pub const DEFAULT_ROSTER: &[&str] = &[
    "Manu",
    "Belinha",
    "Sofia Alves",
    "Letícia Laura",
    "Laura Xavier",
    "Noemi",
    "Maria Luiza",
    "Valentina Altfuldisk",
    "Aysha",
    "Duda",
    "Helô",
    "Aline Gomes",
    "Mari Garcia",
    "Valentina Soares",
];

/// Errors loading a directory seed
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("cannot read directory seed {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid directory seed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate {kind} id {id} in directory seed")]
    Duplicate { kind: &'static str, id: u64 },
}

/// On-disk seed format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectorySeed {
    #[serde(rename = "jogadoras", default)]
    pub players: Vec<Player>,
    #[serde(rename = "jogos", default)]
    pub games: Vec<Game>,
}

#[derive(Debug, Default)]
struct Entries {
    players: BTreeMap<PlayerId, Player>,
    games: BTreeMap<GameId, Game>,
}

/// Directory held in memory
#[derive(Debug, Default)]
pub struct StaticDirectory {
    entries: RwLock<Entries>,
}

impl StaticDirectory {
    /// Empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in roster (ids 1..=14) and no games
    pub fn with_default_roster() -> Self {
        let directory = Self::new();
        for (index, name) in DEFAULT_ROSTER.iter().enumerate() {
            directory.register_player(Player {
                id: PlayerId(index as u64 + 1),
                name: (*name).to_string(),
            });
        }
        directory
    }

    /// Build from a parsed seed, rejecting duplicate ids
    pub fn from_seed(seed: DirectorySeed) -> Result<Self, DirectoryError> {
        let directory = Self::new();
        {
            let mut entries = directory.entries.write();
            for player in seed.players {
                let id = player.id;
                if entries.players.insert(id, player).is_some() {
                    return Err(DirectoryError::Duplicate {
                        kind: "player",
                        id: id.get(),
                    });
                }
            }
            for game in seed.games {
                let id = game.id;
                if entries.games.insert(id, game).is_some() {
                    return Err(DirectoryError::Duplicate {
                        kind: "game",
                        id: id.get(),
                    });
                }
            }
        }
        Ok(directory)
    }

    /// Load a JSON seed file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| DirectoryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let seed: DirectorySeed = serde_json::from_str(&content)?;
        let (players, games) = (seed.players.len(), seed.games.len());
        let directory = Self::from_seed(seed)?;

        info!(path = %path.display(), players, games, "directory seed loaded");
        Ok(directory)
    }

    /// Add or replace a player
    pub fn register_player(&self, player: Player) {
        self.entries.write().players.insert(player.id, player);
    }

    /// Add or replace a game
    pub fn register_game(&self, game: Game) {
        self.entries.write().games.insert(game.id, game);
    }
}

impl Directory for StaticDirectory {
    fn player(&self, id: PlayerId) -> Option<Player> {
        self.entries.read().players.get(&id).cloned()
    }

    fn game(&self, id: GameId) -> Option<Game> {
        self.entries.read().games.get(&id).cloned()
    }

    fn players(&self) -> Vec<Player> {
        self.entries.read().players.values().cloned().collect()
    }

    fn games(&self) -> Vec<Game> {
        self.entries.read().games.values().cloned().collect()
    }

    fn has_game(&self, id: GameId) -> bool {
        self.entries.read().games.contains_key(&id)
    }

    fn has_player(&self, id: PlayerId) -> bool {
        self.entries.read().players.contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SEED: &str = r#"{
        "jogadoras": [{"id": 1, "nome": "Manu"}, {"id": "2", "nome": "Duda"}],
        "jogos": [{"id": 10, "data": "2025-03-01", "local": "Ginásio", "horario": "19:00",
                   "adversario": "Tigres", "categoria": "Sub-15"}]
    }"#;

    #[test]
    fn test_default_roster() {
        let directory = StaticDirectory::with_default_roster();
        assert_eq!(directory.players().len(), 14);
        assert_eq!(directory.display_name(PlayerId(1)), "Manu");
        assert_eq!(directory.display_name(PlayerId(14)), "Valentina Soares");
        assert!(directory.games().is_empty());
    }

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("seed.json");
        fs::write(&path, SEED).unwrap();

        let directory = StaticDirectory::from_file(&path).unwrap();
        assert!(directory.has_player(PlayerId(2)));
        assert!(directory.has_game(GameId(10)));
        assert!(!directory.has_game(GameId(11)));

        let game = directory.game(GameId(10)).unwrap();
        assert_eq!(game.opponent, "Tigres");
        assert_eq!(game.date.to_string(), "2025-03-01");
    }

    #[test]
    fn test_missing_file() {
        let err = StaticDirectory::from_file("/nonexistent/seed.json").unwrap_err();
        assert!(matches!(err, DirectoryError::Io { .. }));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let seed: DirectorySeed = serde_json::from_str(
            r#"{"jogadoras": [{"id": 1, "nome": "A"}, {"id": 1, "nome": "B"}]}"#,
        )
        .unwrap();
        let err = StaticDirectory::from_seed(seed).unwrap_err();
        assert!(matches!(err, DirectoryError::Duplicate { kind: "player", id: 1 }));
    }

    #[test]
    fn test_unknown_player_display_name() {
        let directory = StaticDirectory::new();
        assert_eq!(directory.display_name(PlayerId(77)), "#77");
    }
}
