//! Aggregator - derived totals and leaders for one game
//!
//! `Tally` is a pure function of the live log: `apply` and `revert` keep it
//! in step incrementally, and `rebuild` recomputes it from scratch. Counters
//! that reach zero are removed, so an undone event leaves no trace.

use std::collections::HashMap;

use tracing::error;

use crate::error::{ScoreError, ScoreResult};
use crate::types::{Dashboard, GameId, Leader, PlayerId, StatEvent, StatType};

/// Running counters for a single game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    game_id: GameId,
    totals: HashMap<StatType, u64>,
    per_player: HashMap<StatType, HashMap<PlayerId, u64>>,
}

impl Tally {
    pub fn new(game_id: GameId) -> Self {
        Self {
            game_id,
            totals: HashMap::new(),
            per_player: HashMap::new(),
        }
    }

    /// Fold a sequence of live events into a fresh tally
    pub fn rebuild<'a, I>(game_id: GameId, events: I) -> ScoreResult<Self>
    where
        I: IntoIterator<Item = &'a StatEvent>,
    {
        let mut tally = Self::new(game_id);
        for event in events {
            tally.apply(event)?;
        }
        Ok(tally)
    }

    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    /// Count one event
    pub fn apply(&mut self, event: &StatEvent) -> ScoreResult<()> {
        self.check_game(event)?;

        *self.totals.entry(event.stat).or_insert(0) += 1;
        *self
            .per_player
            .entry(event.stat)
            .or_default()
            .entry(event.player_id)
            .or_insert(0) += 1;

        Ok(())
    }

    /// Uncount one event
    ///
    /// Both counters are checked before either is touched; if one would go
    /// negative the tally is left unchanged and a `Consistency` error is
    /// returned.
    pub fn revert(&mut self, event: &StatEvent) -> ScoreResult<()> {
        self.check_game(event)?;

        let total = self.total(event.stat);
        let player_count = self.count(event.stat, event.player_id);
        if total == 0 || player_count == 0 {
            let reason = format!(
                "reverting event {} (seq {}) would drive '{}' negative for player {} (total {}, player {})",
                event.id, event.sequence_no, event.stat, event.player_id, total, player_count
            );
            error!(
                game_id = %self.game_id,
                event_id = event.id,
                stat = %event.stat,
                player_id = %event.player_id,
                "{}",
                reason
            );
            return Err(ScoreError::Consistency(reason));
        }

        if total == 1 {
            self.totals.remove(&event.stat);
        } else {
            self.totals.insert(event.stat, total - 1);
        }

        if let Some(players) = self.per_player.get_mut(&event.stat) {
            if player_count == 1 {
                players.remove(&event.player_id);
            } else {
                players.insert(event.player_id, player_count - 1);
            }
            if players.is_empty() {
                self.per_player.remove(&event.stat);
            }
        }

        Ok(())
    }

    /// Live count of a stat type
    pub fn total(&self, stat: StatType) -> u64 {
        self.totals.get(&stat).copied().unwrap_or(0)
    }

    /// Live count of a stat type for one player
    pub fn count(&self, stat: StatType, player_id: PlayerId) -> u64 {
        self.per_player
            .get(&stat)
            .and_then(|players| players.get(&player_id))
            .copied()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Totals and leaders, with ties ordered by display name
    ///
    /// `name_of` resolves player display names; ties on name fall back to
    /// player id so the order is always total.
    pub fn snapshot<F>(&self, name_of: F) -> Dashboard
    where
        F: Fn(PlayerId) -> String,
    {
        let mut dashboard = Dashboard::default();

        for stat in StatType::ALL {
            let total = self.total(stat);
            if total == 0 {
                continue;
            }
            dashboard.totals.insert(stat, total);
            dashboard.points += total * stat.points();

            let Some(players) = self.per_player.get(&stat) else {
                continue;
            };
            let max = players.values().copied().max().unwrap_or(0);
            if max == 0 {
                continue;
            }

            let mut leaders: Vec<Leader> = players
                .iter()
                .filter(|(_, &count)| count == max)
                .map(|(&player_id, &count)| Leader {
                    stat,
                    player_name: name_of(player_id),
                    player_id,
                    count,
                })
                .collect();
            leaders.sort_by(|a, b| {
                a.player_name
                    .cmp(&b.player_name)
                    .then(a.player_id.cmp(&b.player_id))
            });
            dashboard.leaders.extend(leaders);
        }

        dashboard
    }

    fn check_game(&self, event: &StatEvent) -> ScoreResult<()> {
        if event.game_id == self.game_id {
            Ok(())
        } else {
            Err(ScoreError::Consistency(format!(
                "event {} of game {} applied to tally of game {}",
                event.id, event.game_id, self.game_id
            )))
        }
    }
}
