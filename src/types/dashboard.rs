//! Aggregate snapshot returned by the dashboard

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{PlayerId, StatType};

/// A player holding the maximum live count for one stat type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leader {
    #[serde(rename = "tipo")]
    pub stat: StatType,

    /// Display name
    #[serde(rename = "jogadora")]
    pub player_name: String,

    #[serde(rename = "id_jogadora")]
    pub player_id: PlayerId,

    #[serde(rename = "quantidade")]
    pub count: u64,
}

/// Totals and leaders for one game, derived from its live events
///
/// Types with a zero total appear in neither map nor list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(rename = "totais")]
    pub totals: BTreeMap<StatType, u64>,

    /// Leaders grouped by type in `StatType` order; ties sorted by name
    #[serde(rename = "destaques")]
    pub leaders: Vec<Leader>,

    /// Points scored by live scoring plays
    #[serde(rename = "pontos")]
    pub points: u64,
}

impl Dashboard {
    pub fn total(&self, stat: StatType) -> u64 {
        self.totals.get(&stat).copied().unwrap_or(0)
    }

    /// Leaders for one type, in tie-break order
    pub fn leaders_for(&self, stat: StatType) -> Vec<&Leader> {
        self.leaders.iter().filter(|l| l.stat == stat).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}
