//! Undo path: newest live event out of the log and out of the tally

use tracing::{info, warn};

use super::{GameState, ScoreChange, Scoreboard};
use crate::error::{ScoreError, ScoreResult};
use crate::types::{GameId, LogRecord, StatEvent};

pub fn undo_last(sb: &Scoreboard, game_id: GameId) -> ScoreResult<StatEvent> {
    pop(sb, game_id, |_, event| event)
}

pub fn undo_change(sb: &Scoreboard, game_id: GameId) -> ScoreResult<ScoreChange> {
    pop(sb, game_id, |state, event| sb.change(state, event))
}

fn pop<T, F>(sb: &Scoreboard, game_id: GameId, finish: F) -> ScoreResult<T>
where
    F: FnOnce(&GameState, StatEvent) -> T,
{
    sb.ensure_game(game_id)?;

    let slot = sb.existing_slot(game_id).ok_or(ScoreError::EmptyLog(game_id))?;
    let mut state = slot.write();

    let event = state
        .log
        .last()
        .cloned()
        .ok_or(ScoreError::EmptyLog(game_id))?;

    // Fails without mutating if a counter would go negative
    state.tally.revert(&event)?;

    if let Err(e) = sb.write_journal(&LogRecord::undone(&event)) {
        warn!(game_id = %game_id, event_id = event.id, error = %e, "undo not journaled, restoring tally");
        state.tally.apply(&event)?;
        return Err(e);
    }

    let undone = state.log.pop_last()?;
    state.version += 1;

    info!(
        game_id = %game_id,
        player_id = %undone.player_id,
        stat = %undone.stat,
        sequence_no = undone.sequence_no,
        event_id = undone.id,
        "stat undone"
    );

    Ok(finish(&*state, undone))
}
