//! Property tests: the dashboard always matches a naive recount of the live
//! events, whatever mix of records and undos produced them.

use std::collections::HashMap;
use std::sync::Arc;

use proptest::prelude::*;

use scorebook::directory::{DirectorySeed, StaticDirectory};
use scorebook::scoreboard::Scoreboard;
use scorebook::types::{GameId, PlayerId, StatType};
use scorebook::ScoreError;

const GAME: GameId = GameId(1);

// Name order deliberately differs from id order
const NAMES: [(u64, &str); 4] = [(1, "Duda"), (2, "Aline"), (3, "Carla"), (4, "Bia")];

#[derive(Debug, Clone)]
enum Op {
    Record(u64, StatType),
    Undo,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (1..=4u64, 0..StatType::ALL.len()).prop_map(|(p, s)| Op::Record(p, StatType::ALL[s])),
        1 => Just(Op::Undo),
    ]
}

fn scoreboard() -> Scoreboard {
    let players: Vec<_> = NAMES
        .iter()
        .map(|(id, name)| serde_json::json!({"id": id, "nome": name}))
        .collect();
    let seed: DirectorySeed = serde_json::from_value(serde_json::json!({
        "jogadoras": players,
        "jogos": [{"id": 1, "data": "2025-06-01", "local": "Ginásio", "horario": "09:00",
                   "adversario": "Onças", "categoria": "Sub-15"}]
    }))
    .unwrap();
    Scoreboard::new(Arc::new(StaticDirectory::from_seed(seed).unwrap()))
}

fn name_of(id: PlayerId) -> &'static str {
    NAMES
        .iter()
        .find(|(pid, _)| *pid == id.0)
        .map(|(_, name)| *name)
        .unwrap()
}

/// Apply `ops`, mirroring them on a plain stack
fn run(sb: &Scoreboard, ops: &[Op]) -> Vec<(PlayerId, StatType)> {
    let mut model = Vec::new();
    for op in ops {
        match op {
            Op::Record(player, stat) => {
                sb.record_stat(GAME, PlayerId(*player), *stat).unwrap();
                model.push((PlayerId(*player), *stat));
            }
            Op::Undo => match sb.undo_last(GAME) {
                Ok(undone) => {
                    let expected = model.pop().unwrap();
                    assert_eq!((undone.player_id, undone.stat), expected);
                }
                Err(ScoreError::EmptyLog(_)) => assert!(model.is_empty()),
                Err(e) => panic!("unexpected error: {}", e),
            },
        }
    }
    model
}

proptest! {
    /// Totals equal the number of live events of each type
    #[test]
    fn prop_totals_match_live_events(ops in prop::collection::vec(op(), 0..80)) {
        let sb = scoreboard();
        let model = run(&sb, &ops);
        let dashboard = sb.dashboard(GAME).unwrap();

        for stat in StatType::ALL {
            let expected = model.iter().filter(|(_, s)| *s == stat).count() as u64;
            prop_assert_eq!(dashboard.total(stat), expected);
        }

        let points: u64 = model.iter().map(|(_, s)| s.points()).sum();
        prop_assert_eq!(dashboard.points, points);
        prop_assert_eq!(sb.live_events(GAME).unwrap().len(), model.len());
        prop_assert!(sb.verify(GAME).is_ok());
    }

    /// Leaders are exactly the players at the maximum count, sorted by name
    #[test]
    fn prop_leaders_are_maxima(ops in prop::collection::vec(op(), 0..80)) {
        let sb = scoreboard();
        let model = run(&sb, &ops);
        let dashboard = sb.dashboard(GAME).unwrap();

        for stat in StatType::ALL {
            let mut counts: HashMap<PlayerId, u64> = HashMap::new();
            for (player, _) in model.iter().filter(|(_, s)| *s == stat) {
                *counts.entry(*player).or_default() += 1;
            }

            let leaders = dashboard.leaders_for(stat);
            let Some(max) = counts.values().copied().max() else {
                prop_assert!(leaders.is_empty());
                continue;
            };

            let mut expected: Vec<PlayerId> = counts
                .iter()
                .filter(|(_, c)| **c == max)
                .map(|(p, _)| *p)
                .collect();
            expected.sort_by_key(|p| name_of(*p));

            let actual: Vec<PlayerId> = leaders.iter().map(|l| l.player_id).collect();
            prop_assert!(!actual.is_empty());
            prop_assert_eq!(actual, expected);
            prop_assert!(leaders.iter().all(|l| l.count == max));
        }
    }

    /// Recording then undoing restores the previous dashboard and live log
    #[test]
    fn prop_undo_is_left_inverse(
        ops in prop::collection::vec(op(), 0..40),
        player in 1..=4u64,
        stat_index in 0..StatType::ALL.len(),
    ) {
        let sb = scoreboard();
        run(&sb, &ops);
        let dashboard = sb.dashboard(GAME).unwrap();
        let events = sb.live_events(GAME).unwrap();

        let recorded = sb.record_stat(GAME, PlayerId(player), StatType::ALL[stat_index]).unwrap();
        let undone = sb.undo_last(GAME).unwrap();

        prop_assert_eq!(undone, recorded);
        prop_assert_eq!(sb.dashboard(GAME).unwrap(), dashboard);
        prop_assert_eq!(sb.live_events(GAME).unwrap(), events);
    }

    /// Sequence numbers strictly increase and are never handed out twice
    #[test]
    fn prop_sequence_numbers_never_reused(ops in prop::collection::vec(op(), 1..80)) {
        let sb = scoreboard();
        run(&sb, &ops);

        let seqs: Vec<u64> = sb.live_events(GAME).unwrap().iter().map(|e| e.sequence_no).collect();
        prop_assert!(seqs.windows(2).all(|w| w[0] < w[1]));

        let next = sb.record_stat(GAME, PlayerId(1), StatType::Foul).unwrap();
        let records = ops.iter().filter(|op| matches!(op, Op::Record(..))).count() as u64;
        prop_assert_eq!(next.sequence_no, records + 1);
    }
}
