//! Per-game append-only log
//!
//! `GameLog` owns the ordered stat events of one game. Live events are kept
//! in `sequence_no` order and undo removes the newest one. The sequence
//! counter never goes backwards, so an undone number is never handed out
//! again.

use crate::error::{ScoreError, ScoreResult};
use crate::types::{GameId, PlayerId, StatEvent, StatType};

/// The event log of a single game
#[derive(Debug, Clone)]
pub struct GameLog {
    game_id: GameId,
    /// Live events, ascending by sequence_no
    live: Vec<StatEvent>,
    /// Next sequence number to assign
    next_sequence: u64,
}

impl GameLog {
    /// Create an empty log; the first event gets sequence number 1
    pub fn new(game_id: GameId) -> Self {
        Self {
            game_id,
            live: Vec::new(),
            next_sequence: 1,
        }
    }

    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    /// Get the next sequence number (without incrementing)
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    /// Build the event the next append would store, without storing it
    pub fn draft(&self, event_id: u64, player_id: PlayerId, stat: StatType) -> StatEvent {
        StatEvent::new(event_id, self.game_id, player_id, stat, self.next_sequence)
    }

    /// Store a drafted event as live
    ///
    /// The event must belong to this game and carry exactly the next
    /// sequence number.
    pub fn commit(&mut self, event: StatEvent) -> ScoreResult<()> {
        if event.game_id != self.game_id {
            return Err(ScoreError::Consistency(format!(
                "event {} belongs to game {}, not {}",
                event.id, event.game_id, self.game_id
            )));
        }
        if event.sequence_no != self.next_sequence {
            return Err(ScoreError::Consistency(format!(
                "game {} expected sequence {}, got {}",
                self.game_id, self.next_sequence, event.sequence_no
            )));
        }

        self.next_sequence += 1;
        self.live.push(event);
        Ok(())
    }

    /// The live event with the highest sequence number
    pub fn last(&self) -> Option<&StatEvent> {
        self.live.last()
    }

    /// Remove the newest live event and return it
    pub fn pop_last(&mut self) -> ScoreResult<StatEvent> {
        self.live.pop().ok_or(ScoreError::EmptyLog(self.game_id))
    }

    /// Live events in sequence order
    pub fn live(&self) -> &[StatEvent] {
        &self.live
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}
