//! Stat events and journal records
//!
//! A `StatEvent` is one recorded play. It is immutable once created; undo
//! retires it rather than editing it. `LogRecord` is the line format of the
//! optional on-disk journal that lets the whole state be rebuilt by replay.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{GameId, PlayerId, StatType};

/// One recorded play, for a player, in a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEvent {
    /// Globally unique event id
    pub id: u64,

    #[serde(rename = "id_jogo")]
    pub game_id: GameId,

    #[serde(rename = "id_jogadora")]
    pub player_id: PlayerId,

    #[serde(rename = "tipo")]
    pub stat: StatType,

    /// Per-game ordering key, strictly increasing, never reused
    #[serde(rename = "sequencia")]
    pub sequence_no: u64,

    /// Wall-clock creation time (informational only)
    #[serde(rename = "criado_em")]
    pub created_at: DateTime<Utc>,
}

impl StatEvent {
    /// Create a new event stamped with the current time
    pub fn new(id: u64, game_id: GameId, player_id: PlayerId, stat: StatType, sequence_no: u64) -> Self {
        Self {
            id,
            game_id,
            player_id,
            stat,
            sequence_no,
            created_at: Utc::now(),
        }
    }
}

/// A single line of the journal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum LogRecord {
    /// An event was appended and became live
    Recorded { event: StatEvent },

    /// The last live event of a game was undone
    Undone {
        game_id: GameId,
        sequence_no: u64,
        event_id: u64,
        at: DateTime<Utc>,
    },
}

impl LogRecord {
    pub fn recorded(event: &StatEvent) -> Self {
        LogRecord::Recorded {
            event: event.clone(),
        }
    }

    pub fn undone(event: &StatEvent) -> Self {
        LogRecord::Undone {
            game_id: event.game_id,
            sequence_no: event.sequence_no,
            event_id: event.id,
            at: Utc::now(),
        }
    }

    /// Game the record belongs to
    pub fn game_id(&self) -> GameId {
        match self {
            LogRecord::Recorded { event } => event.game_id,
            LogRecord::Undone { game_id, .. } => *game_id,
        }
    }

    /// Serialize record to JSON string (for JSONL)
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize record from JSON string
    pub fn from_json_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> StatEvent {
        StatEvent::new(41, GameId(3), PlayerId(9), StatType::TwoPoint, 5)
    }

    #[test]
    fn test_stat_event_wire_names() {
        let json = serde_json::to_value(sample_event()).unwrap();
        assert_eq!(json["id"], 41);
        assert_eq!(json["id_jogo"], 3);
        assert_eq!(json["id_jogadora"], 9);
        assert_eq!(json["tipo"], "+2");
        assert_eq!(json["sequencia"], 5);
        assert!(json["criado_em"].is_string());
    }

    #[test]
    fn test_recorded_line() {
        let record = LogRecord::recorded(&sample_event());
        let line = record.to_json_line().unwrap();
        assert!(line.contains("\"op\":\"recorded\""));

        let parsed = LogRecord::from_json_line(&line).unwrap();
        assert_eq!(parsed, record);
        assert_eq!(parsed.game_id(), GameId(3));
    }

    #[test]
    fn test_undone_line() {
        let record = LogRecord::undone(&sample_event());
        let line = record.to_json_line().unwrap();
        assert!(line.contains("\"op\":\"undone\""));
        assert!(line.contains("\"sequence_no\":5"));

        match LogRecord::from_json_line(&line).unwrap() {
            LogRecord::Undone { event_id, game_id, .. } => {
                assert_eq!(event_id, 41);
                assert_eq!(game_id, GameId(3));
            }
            other => panic!("unexpected record: {:?}", other),
        }
    }
}
