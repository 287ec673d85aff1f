//! Live feed message types

use serde::{Deserialize, Serialize};

use crate::scoreboard::ScoreChange;
use crate::types::{Dashboard, GameId, StatEvent};

/// Scoring changes broadcast to feed subscribers
///
/// `version` is the game's mutation counter at the time `dashboard` was
/// taken; a client keeps, per game, the message with the highest version.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedEvent {
    /// A stat was recorded
    StatRecorded {
        game_id: GameId,
        event: StatEvent,
        dashboard: Dashboard,
        version: u64,
    },

    /// The last stat of a game was undone
    StatUndone {
        game_id: GameId,
        event: StatEvent,
        dashboard: Dashboard,
        version: u64,
    },
}

impl FeedEvent {
    pub fn recorded(change: ScoreChange) -> Self {
        FeedEvent::StatRecorded {
            game_id: change.event.game_id,
            event: change.event,
            dashboard: change.dashboard,
            version: change.version,
        }
    }

    pub fn undone(change: ScoreChange) -> Self {
        FeedEvent::StatUndone {
            game_id: change.event.game_id,
            event: change.event,
            dashboard: change.dashboard,
            version: change.version,
        }
    }

    pub fn game_id(&self) -> GameId {
        match self {
            FeedEvent::StatRecorded { game_id, .. } | FeedEvent::StatUndone { game_id, .. } => *game_id,
        }
    }

    pub fn version(&self) -> u64 {
        match self {
            FeedEvent::StatRecorded { version, .. } | FeedEvent::StatUndone { version, .. } => *version,
        }
    }
}

/// WebSocket message wrapper with metadata
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeedMessage {
    #[serde(flatten)]
    pub event: FeedEvent,

    /// Monotonically increasing sequence ID for gap detection
    pub sequence_id: u64,

    /// Unix timestamp when the message was published
    pub timestamp: i64,
}

/// Client message types
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Restrict (or with no id, widen) the feed to one game
    Subscribe {
        #[serde(default)]
        jogo_id: Option<GameId>,
    },

    /// Heartbeat
    Ping,
}

/// Sent once on connect
#[derive(Clone, Debug, Serialize)]
pub struct WelcomeMessage {
    #[serde(rename = "type")]
    pub msg_type: &'static str,
    pub sequence_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jogo_id: Option<GameId>,
}

impl WelcomeMessage {
    pub fn new(sequence_id: u64, jogo_id: Option<GameId>) -> Self {
        Self {
            msg_type: "welcome",
            sequence_id,
            jogo_id,
        }
    }
}

/// Reply to a client ping
#[derive(Clone, Debug, Serialize)]
pub struct PongMessage {
    #[serde(rename = "type")]
    pub msg_type: &'static str,
    pub timestamp: i64,
}

impl Default for PongMessage {
    fn default() -> Self {
        Self {
            msg_type: "pong",
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PlayerId, StatType};

    #[test]
    fn test_feed_message_shape() {
        let event = StatEvent::new(1, GameId(2), PlayerId(3), StatType::Steal, 1);
        let msg = FeedMessage {
            event: FeedEvent::recorded(ScoreChange {
                event,
                dashboard: Dashboard::default(),
                version: 5,
            }),
            sequence_id: 7,
            timestamp: 0,
        };

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "stat_recorded");
        assert_eq!(json["game_id"], 2);
        assert_eq!(json["event"]["tipo"], "roubo");
        assert_eq!(json["sequence_id"], 7);
        assert_eq!(json["version"], 5);
    }

    #[test]
    fn test_client_messages() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type":"subscribe","jogo_id":"4"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Subscribe { jogo_id: Some(GameId(4)) }));

        let msg: ClientMessage = serde_json::from_str(r#"{"type":"subscribe"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Subscribe { jogo_id: None }));

        let msg: ClientMessage = serde_json::from_str(r#"{"type":"ping"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Ping));
    }
}
