//! Read path: dashboard snapshot, live event listing, consistency check

use tracing::{debug, error};

use super::Scoreboard;
use crate::aggregator::Tally;
use crate::error::{ScoreError, ScoreResult};
use crate::types::{Dashboard, GameId, StatEvent};

pub fn dashboard(sb: &Scoreboard, game_id: GameId) -> ScoreResult<Dashboard> {
    sb.ensure_game(game_id)?;

    let Some(slot) = sb.existing_slot(game_id) else {
        return Ok(Dashboard::default());
    };

    let state = slot.read();
    let dashboard = sb.snapshot(&state);

    debug!(game_id = %game_id, live = state.log.len(), "dashboard read");
    Ok(dashboard)
}

pub fn live_events(sb: &Scoreboard, game_id: GameId) -> ScoreResult<Vec<StatEvent>> {
    sb.ensure_game(game_id)?;

    Ok(sb
        .existing_slot(game_id)
        .map(|slot| {
            let state = slot.read();
            state.log.live().to_vec()
        })
        .unwrap_or_default())
}

pub fn verify(sb: &Scoreboard, game_id: GameId) -> ScoreResult<()> {
    let Some(slot) = sb.existing_slot(game_id) else {
        return Ok(());
    };

    let state = slot.read();
    let rebuilt = Tally::rebuild(game_id, state.log.live())?;
    if rebuilt != state.tally {
        error!(game_id = %game_id, "tally differs from replay of the live log");
        return Err(ScoreError::Consistency(format!(
            "tally of game {} differs from replay of its {} live events",
            game_id,
            state.log.len()
        )));
    }
    Ok(())
}
