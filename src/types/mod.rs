//! Data types for the scorebook
//!
//! This module contains the core data structures shared by the event store,
//! the aggregator and the HTTP layer.

mod dashboard;
mod event;
mod ids;
mod stat;

pub use dashboard::{Dashboard, Leader};
pub use event::{LogRecord, StatEvent};
pub use ids::{GameId, PlayerId};
pub use stat::{StatType, UnknownStatType};
