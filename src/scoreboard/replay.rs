//! Startup replay of journal records

use std::collections::BTreeSet;

use tracing::{info, warn};

use super::Scoreboard;
use crate::error::{JournalError, ScoreResult};
use crate::types::{GameId, LogRecord};

/// What a replay rebuilt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Records applied
    pub records: usize,
    /// Undo records among them
    pub undos: usize,
    /// Distinct games touched
    pub games: usize,
    /// Live events after replay, all games
    pub live_events: usize,
}

pub fn replay(sb: &mut Scoreboard, records: Vec<(usize, LogRecord)>) -> ScoreResult<ReplaySummary> {
    let mut summary = ReplaySummary::default();
    let mut games: BTreeSet<GameId> = BTreeSet::new();

    for (line, record) in records {
        let game_id = record.game_id();
        let slot = sb.slot(game_id);
        let mut state = slot.write();

        match record {
            LogRecord::Recorded { event } => {
                let event_id = event.id;
                // The next live id would not fit
                if event_id == u64::MAX {
                    return Err(corrupted(line, format!("event id {} is out of range", event_id)).into());
                }
                state.log.commit(event.clone()).map_err(|e| corrupted(line, e))?;
                state.tally.apply(&event).map_err(|e| corrupted(line, e))?;
                sb.observe_event_id(event_id);
            }
            LogRecord::Undone {
                sequence_no,
                event_id,
                ..
            } => {
                let matches_last = state
                    .log
                    .last()
                    .is_some_and(|last| last.sequence_no == sequence_no && last.id == event_id);
                if !matches_last {
                    return Err(JournalError::Corrupted {
                        line,
                        reason: format!(
                            "undo of event {} (seq {}) is not the last live event of game {}",
                            event_id, sequence_no, game_id
                        ),
                    }
                    .into());
                }
                let undone = state.log.pop_last()?;
                state.tally.revert(&undone).map_err(|e| corrupted(line, e))?;
                summary.undos += 1;
            }
        }

        state.version += 1;
        games.insert(game_id);
        summary.records += 1;
    }

    for game_id in &games {
        if !sb.directory.has_game(*game_id) {
            warn!(game_id = %game_id, "journal holds events for a game missing from the directory");
        }
        if let Some(slot) = sb.existing_slot(*game_id) {
            summary.live_events += slot.read().log.len();
        }
    }
    summary.games = games.len();

    if summary.records > 0 {
        info!(
            records = summary.records,
            undos = summary.undos,
            games = summary.games,
            live_events = summary.live_events,
            "journal replayed"
        );
    }

    Ok(summary)
}

fn corrupted(line: usize, e: impl std::fmt::Display) -> JournalError {
    JournalError::Corrupted {
        line,
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoreError;
    use crate::scoreboard::tests_support::directory_with_game;
    use crate::types::{PlayerId, StatEvent, StatType};

    fn recorded(id: u64, seq: u64, player: u64, stat: StatType) -> LogRecord {
        LogRecord::recorded(&StatEvent::new(id, GameId(1), PlayerId(player), stat, seq))
    }

    #[test]
    fn test_replay_rebuilds_state() {
        let e2 = StatEvent::new(2, GameId(1), PlayerId(2), StatType::TwoPoint, 2);
        let records = vec![
            (1, recorded(1, 1, 1, StatType::TwoPoint)),
            (2, LogRecord::recorded(&e2)),
            (3, LogRecord::undone(&e2)),
            (4, recorded(3, 3, 1, StatType::Assist)),
        ];

        let mut sb = Scoreboard::new(directory_with_game(1));
        let summary = sb.replay(records).unwrap();

        assert_eq!(summary.records, 4);
        assert_eq!(summary.undos, 1);
        assert_eq!(summary.games, 1);
        assert_eq!(summary.live_events, 2);

        let dashboard = sb.dashboard(GameId(1)).unwrap();
        assert_eq!(dashboard.total(StatType::TwoPoint), 1);
        assert_eq!(dashboard.total(StatType::Assist), 1);
        sb.verify(GameId(1)).unwrap();

        // Sequence and event ids continue after the replayed ones
        let next = sb.record(GameId(1), PlayerId(1), "+1").unwrap();
        assert_eq!(next.sequence_no, 4);
        assert_eq!(next.id, 4);
    }

    #[test]
    fn test_replay_rejects_out_of_order_undo() {
        let e1 = StatEvent::new(1, GameId(1), PlayerId(1), StatType::Foul, 1);
        let records = vec![
            (1, LogRecord::recorded(&e1)),
            (2, recorded(2, 2, 1, StatType::Foul)),
            (3, LogRecord::undone(&e1)),
        ];

        let mut sb = Scoreboard::new(directory_with_game(1));
        let err = sb.replay(records).unwrap_err();
        assert!(matches!(
            err,
            ScoreError::Journal(JournalError::Corrupted { line: 3, .. })
        ));
    }

    #[test]
    fn test_replay_rejects_sequence_gap() {
        let records = vec![
            (1, recorded(1, 1, 1, StatType::Foul)),
            (2, recorded(2, 5, 1, StatType::Foul)),
        ];

        let mut sb = Scoreboard::new(directory_with_game(1));
        assert!(matches!(
            sb.replay(records),
            Err(ScoreError::Journal(JournalError::Corrupted { line: 2, .. }))
        ));
    }

    #[test]
    fn test_replay_rejects_exhausted_event_id() {
        let records = vec![(1, recorded(u64::MAX, 1, 1, StatType::Foul))];

        let mut sb = Scoreboard::new(directory_with_game(1));
        assert!(matches!(
            sb.replay(records),
            Err(ScoreError::Journal(JournalError::Corrupted { line: 1, .. }))
        ));
    }

    #[test]
    fn test_observe_event_id_saturates() {
        let sb = Scoreboard::new(directory_with_game(1));
        sb.observe_event_id(u64::MAX);
        assert_eq!(sb.allocate_event_id(), u64::MAX);
    }

    #[test]
    fn test_replay_counts_versions() {
        let e2 = StatEvent::new(2, GameId(1), PlayerId(2), StatType::Block, 2);
        let records = vec![
            (1, recorded(1, 1, 1, StatType::Block)),
            (2, LogRecord::recorded(&e2)),
            (3, LogRecord::undone(&e2)),
        ];

        let mut sb = Scoreboard::new(directory_with_game(1));
        sb.replay(records).unwrap();

        let change = sb.record_change(GameId(1), PlayerId(1), "toco").unwrap();
        assert_eq!(change.version, 4);
    }
}
