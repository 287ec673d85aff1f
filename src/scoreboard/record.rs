//! Append path: validate, journal, commit, count

use tracing::info;

use super::{GameState, ScoreChange, Scoreboard};
use crate::error::{ScoreError, ScoreResult};
use crate::types::{GameId, LogRecord, PlayerId, StatEvent, StatType, UnknownStatType};

pub fn record(sb: &Scoreboard, game_id: GameId, player_id: PlayerId, stat: &str) -> ScoreResult<StatEvent> {
    let stat = validate(sb, game_id, player_id, stat)?;
    append(sb, game_id, player_id, stat, |_, event| event)
}

pub fn record_stat(sb: &Scoreboard, game_id: GameId, player_id: PlayerId, stat: StatType) -> ScoreResult<StatEvent> {
    ensure_participants(sb, game_id, player_id)?;
    append(sb, game_id, player_id, stat, |_, event| event)
}

pub fn record_change(sb: &Scoreboard, game_id: GameId, player_id: PlayerId, stat: &str) -> ScoreResult<ScoreChange> {
    let stat = validate(sb, game_id, player_id, stat)?;
    append(sb, game_id, player_id, stat, |state, event| sb.change(state, event))
}

/// Game, then player, then stat type
fn validate(sb: &Scoreboard, game_id: GameId, player_id: PlayerId, stat: &str) -> ScoreResult<StatType> {
    ensure_participants(sb, game_id, player_id)?;
    stat.parse::<StatType>()
        .map_err(|e: UnknownStatType| ScoreError::InvalidType(e.0))
}

fn ensure_participants(sb: &Scoreboard, game_id: GameId, player_id: PlayerId) -> ScoreResult<()> {
    sb.ensure_game(game_id)?;
    if !sb.directory.has_player(player_id) {
        return Err(ScoreError::InvalidPlayer(player_id));
    }
    Ok(())
}

/// Run the append under the game's write lock; `finish` sees the updated
/// state before the lock is released
fn append<T, F>(sb: &Scoreboard, game_id: GameId, player_id: PlayerId, stat: StatType, finish: F) -> ScoreResult<T>
where
    F: FnOnce(&GameState, StatEvent) -> T,
{
    let slot = sb.slot(game_id);
    let mut state = slot.write();

    let event = state.log.draft(sb.allocate_event_id(), player_id, stat);

    // Nothing in memory changes unless the journal accepted the record
    sb.write_journal(&LogRecord::recorded(&event))?;

    state.log.commit(event.clone())?;
    state.tally.apply(&event)?;
    state.version += 1;

    info!(
        game_id = %game_id,
        player_id = %player_id,
        stat = %stat,
        sequence_no = event.sequence_no,
        event_id = event.id,
        "stat recorded"
    );

    Ok(finish(&*state, event))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tempfile::TempDir;

    use super::*;
    use crate::directory::{Player, StaticDirectory};
    use crate::event_store::{Journal, JournalConfig};
    use crate::scoreboard::tests_support::directory_with_game;

    #[test]
    fn test_record_assigns_sequence() {
        let sb = Scoreboard::new(directory_with_game(1));
        let e1 = sb.record(GameId(1), PlayerId(1), "+2").unwrap();
        let e2 = sb.record(GameId(1), PlayerId(2), "rebote").unwrap();

        assert_eq!(e1.sequence_no, 1);
        assert_eq!(e2.sequence_no, 2);
        assert_ne!(e1.id, e2.id);
        assert_eq!(e2.stat, StatType::Rebound);
    }

    #[test]
    fn test_validation_order() {
        let sb = Scoreboard::new(directory_with_game(1));

        // Unknown game wins over unknown player and type
        let err = sb.record(GameId(9), PlayerId(99), "+9").unwrap_err();
        assert!(matches!(err, ScoreError::InvalidGame(GameId(9))));

        let err = sb.record(GameId(1), PlayerId(99), "+9").unwrap_err();
        assert!(matches!(err, ScoreError::InvalidPlayer(PlayerId(99))));

        let err = sb.record(GameId(1), PlayerId(1), "+9").unwrap_err();
        assert!(matches!(err, ScoreError::InvalidType(ref t) if t == "+9"));
    }

    #[test]
    fn test_failed_validation_leaves_no_state() {
        let sb = Scoreboard::new(directory_with_game(1));
        let _ = sb.record(GameId(1), PlayerId(1), "dunk");
        assert!(sb.existing_slot(GameId(1)).is_none());
        assert!(sb.dashboard(GameId(1)).unwrap().is_empty());
    }

    #[test]
    fn test_record_stat_typed() {
        let directory = Arc::new(StaticDirectory::new());
        directory.register_player(Player {
            id: PlayerId(5),
            name: "Noemi".to_string(),
        });
        directory.register_game(crate::scoreboard::tests_support::game(3));

        let sb = Scoreboard::new(directory);
        let event = sb.record_stat(GameId(3), PlayerId(5), StatType::Steal).unwrap();
        assert_eq!(event.game_id, GameId(3));
        assert_eq!(sb.dashboard(GameId(3)).unwrap().total(StatType::Steal), 1);
    }

    #[test]
    fn test_record_change_snapshot() {
        let sb = Scoreboard::new(directory_with_game(1));
        let first = sb.record_change(GameId(1), PlayerId(1), "+3").unwrap();
        let second = sb.record_change(GameId(1), PlayerId(2), "+2").unwrap();

        assert_eq!(first.version, 1);
        assert_eq!(first.dashboard.points, 3);
        assert_eq!(second.version, 2);
        assert_eq!(second.event.sequence_no, 2);
        assert_eq!(second.dashboard, sb.dashboard(GameId(1)).unwrap());
    }

    #[test]
    fn test_journal_failure_leaves_state_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let config = JournalConfig::new(temp_dir.path());
        let mut sb = Scoreboard::new(directory_with_game(1));
        sb.journal = Some(Journal::open(&config).unwrap());
        sb.record(GameId(1), PlayerId(1), "+2").unwrap();
        let before = sb.dashboard(GameId(1)).unwrap();

        sb.journal = Some(Journal::open_read_only(&config).unwrap());
        let err = sb.record(GameId(1), PlayerId(2), "+3").unwrap_err();
        assert!(matches!(err, ScoreError::Journal(_)));

        {
            let slot = sb.existing_slot(GameId(1)).unwrap();
            let state = slot.read();
            assert_eq!(state.log.len(), 1);
            assert_eq!(state.log.next_sequence(), 2);
            assert_eq!(state.version, 1);
        }
        assert_eq!(sb.dashboard(GameId(1)).unwrap(), before);
        sb.verify(GameId(1)).unwrap();

        // The failed attempt did not burn a sequence number
        sb.journal = Some(Journal::open(&config).unwrap());
        let next = sb.record(GameId(1), PlayerId(2), "+3").unwrap();
        assert_eq!(next.sequence_no, 2);
        assert_eq!(Journal::load(&config.journal_path()).unwrap().len(), 2);
    }
}
