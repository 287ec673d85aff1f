//! Recognized stat types
//!
//! The set is closed: every play the scoring table can record maps to one
//! variant, and aggregate state is keyed directly by it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A kind of play that can be credited to a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatType {
    /// Made free throw
    FreeThrow,
    /// Made two-point field goal
    TwoPoint,
    /// Made three-point field goal
    ThreePoint,
    Assist,
    Rebound,
    Steal,
    Block,
    Turnover,
    Foul,
}

impl StatType {
    /// All variants, in display order
    pub const ALL: [StatType; 9] = [
        StatType::FreeThrow,
        StatType::TwoPoint,
        StatType::ThreePoint,
        StatType::Assist,
        StatType::Rebound,
        StatType::Steal,
        StatType::Block,
        StatType::Turnover,
        StatType::Foul,
    ];

    /// Wire name used by the scoring client
    pub fn as_str(self) -> &'static str {
        match self {
            StatType::FreeThrow => "+1",
            StatType::TwoPoint => "+2",
            StatType::ThreePoint => "+3",
            StatType::Assist => "assistencia",
            StatType::Rebound => "rebote",
            StatType::Steal => "roubo",
            StatType::Block => "toco",
            StatType::Turnover => "erro",
            StatType::Foul => "falta",
        }
    }

    /// Points added to the score by one play of this type
    pub fn points(self) -> u64 {
        match self {
            StatType::FreeThrow => 1,
            StatType::TwoPoint => 2,
            StatType::ThreePoint => 3,
            _ => 0,
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            StatType::FreeThrow => &["lance_livre", "free_throw"],
            StatType::TwoPoint => &["dois_pontos", "two_point"],
            StatType::ThreePoint => &["tres_pontos", "three_point"],
            StatType::Assist => &["assist"],
            StatType::Rebound => &["rebound"],
            StatType::Steal => &["steal"],
            StatType::Block => &["block"],
            StatType::Turnover => &["turnover"],
            StatType::Foul => &["foul"],
        }
    }
}

/// Error returned when a string names no recognized stat type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized stat type '{0}'")]
pub struct UnknownStatType(pub String);

impl FromStr for StatType {
    type Err = UnknownStatType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        StatType::ALL
            .into_iter()
            .find(|t| {
                t.as_str().eq_ignore_ascii_case(needle)
                    || t.aliases().iter().any(|a| a.eq_ignore_ascii_case(needle))
            })
            .ok_or_else(|| UnknownStatType(s.to_string()))
    }
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StatType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StatType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
