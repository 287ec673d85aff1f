//! Scoreboard - the scoring engine
//!
//! Ties the event store and the aggregator together behind per-game
//! critical sections. Each game owns one `RwLock<GameState>`: `record` and
//! `undo_last` hold its write half for the whole log-plus-tally update, and
//! `dashboard` takes the read half, so readers never see a log entry without
//! its aggregate effect. Different games never share a lock; the outer map
//! lock is only held long enough to look up or insert a game slot.

mod dashboard;
mod record;
mod replay;
mod undo;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::aggregator::Tally;
use crate::directory::Directory;
use crate::error::{ScoreError, ScoreResult};
use crate::event_store::{GameLog, Journal, JournalConfig};
use crate::types::{Dashboard, GameId, LogRecord, PlayerId, StatEvent, StatType};

pub use replay::ReplaySummary;

/// Log and aggregate of one game, always mutated together
#[derive(Debug, Clone)]
pub(crate) struct GameState {
    pub(crate) log: GameLog,
    pub(crate) tally: Tally,
    /// Bumped by every record and undo, replayed ones included
    pub(crate) version: u64,
}

impl GameState {
    fn new(game_id: GameId) -> Self {
        Self {
            log: GameLog::new(game_id),
            tally: Tally::new(game_id),
            version: 0,
        }
    }
}

/// A mutation together with the dashboard it produced
///
/// Both are captured inside the game's critical section. Of two changes to
/// the same game, the one with the higher `version` is the newer state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreChange {
    pub event: StatEvent,
    pub dashboard: Dashboard,
    pub version: u64,
}

type GameSlot = Arc<RwLock<GameState>>;

/// Scoring engine shared by all request handlers
pub struct Scoreboard {
    pub(crate) directory: Arc<dyn Directory>,
    games: RwLock<HashMap<GameId, GameSlot>>,
    pub(crate) journal: Option<Journal>,
    next_event_id: AtomicU64,
}

impl Scoreboard {
    /// In-memory scoreboard without a journal
    pub fn new(directory: Arc<dyn Directory>) -> Self {
        Self {
            directory,
            games: RwLock::new(HashMap::new()),
            journal: None,
            next_event_id: AtomicU64::new(1),
        }
    }

    /// Replay the journal under `config`, then keep appending to it
    pub fn open(directory: Arc<dyn Directory>, config: &JournalConfig) -> ScoreResult<(Self, ReplaySummary)> {
        // Opening first trims a torn tail before anything is replayed
        let journal = Journal::open(config)?;
        let records = Journal::load(journal.path())?;
        let mut scoreboard = Self::new(directory);
        let summary = scoreboard.replay(records)?;
        scoreboard.journal = Some(journal);
        Ok((scoreboard, summary))
    }

    pub fn directory(&self) -> &Arc<dyn Directory> {
        &self.directory
    }

    /// Slot for a game, created on first write
    pub(crate) fn slot(&self, game_id: GameId) -> GameSlot {
        if let Some(slot) = self.games.read().get(&game_id) {
            return Arc::clone(slot);
        }
        let mut games = self.games.write();
        Arc::clone(
            games
                .entry(game_id)
                .or_insert_with(|| Arc::new(RwLock::new(GameState::new(game_id)))),
        )
    }

    /// Slot for a game, if anything was ever recorded for it
    pub(crate) fn existing_slot(&self, game_id: GameId) -> Option<GameSlot> {
        self.games.read().get(&game_id).cloned()
    }

    pub(crate) fn allocate_event_id(&self) -> u64 {
        self.next_event_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Make sure ids issued later are above `seen`
    pub(crate) fn observe_event_id(&self, seen: u64) {
        self.next_event_id.fetch_max(seen.saturating_add(1), Ordering::SeqCst);
    }

    pub(crate) fn write_journal(&self, record: &LogRecord) -> ScoreResult<()> {
        match &self.journal {
            Some(journal) => journal.append(record).map_err(ScoreError::from),
            None => Ok(()),
        }
    }

    pub(crate) fn ensure_game(&self, game_id: GameId) -> ScoreResult<()> {
        if self.directory.has_game(game_id) {
            Ok(())
        } else {
            Err(ScoreError::InvalidGame(game_id))
        }
    }

    pub(crate) fn snapshot(&self, state: &GameState) -> Dashboard {
        let directory = &self.directory;
        state.tally.snapshot(|player_id| directory.display_name(player_id))
    }

    pub(crate) fn change(&self, state: &GameState, event: StatEvent) -> ScoreChange {
        ScoreChange {
            dashboard: self.snapshot(state),
            version: state.version,
            event,
        }
    }
}

// Operations live in submodules
impl Scoreboard {
    /// Append a stat given its wire name and count it
    pub fn record(&self, game_id: GameId, player_id: PlayerId, stat: &str) -> ScoreResult<StatEvent> {
        record::record(self, game_id, player_id, stat)
    }

    /// Append an already-parsed stat and count it
    pub fn record_stat(&self, game_id: GameId, player_id: PlayerId, stat: StatType) -> ScoreResult<StatEvent> {
        record::record_stat(self, game_id, player_id, stat)
    }

    /// Like `record`, also returning the dashboard right after the append
    pub fn record_change(&self, game_id: GameId, player_id: PlayerId, stat: &str) -> ScoreResult<ScoreChange> {
        record::record_change(self, game_id, player_id, stat)
    }

    /// Remove the newest live event of a game and uncount it
    pub fn undo_last(&self, game_id: GameId) -> ScoreResult<StatEvent> {
        undo::undo_last(self, game_id)
    }

    /// Like `undo_last`, also returning the dashboard right after the undo
    pub fn undo_change(&self, game_id: GameId) -> ScoreResult<ScoreChange> {
        undo::undo_change(self, game_id)
    }

    /// Current totals and leaders of a game
    pub fn dashboard(&self, game_id: GameId) -> ScoreResult<Dashboard> {
        dashboard::dashboard(self, game_id)
    }

    /// Live events of a game, in sequence order
    pub fn live_events(&self, game_id: GameId) -> ScoreResult<Vec<StatEvent>> {
        dashboard::live_events(self, game_id)
    }

    /// Check the incremental tally against a rebuild from the live log
    pub fn verify(&self, game_id: GameId) -> ScoreResult<()> {
        dashboard::verify(self, game_id)
    }

    /// Rebuild state from journal records
    pub fn replay(&mut self, records: Vec<(usize, LogRecord)>) -> ScoreResult<ReplaySummary> {
        replay::replay(self, records)
    }
}
