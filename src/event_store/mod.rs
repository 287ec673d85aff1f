//! Event Store
//!
//! The single source of truth for scoring state:
//! - `GameLog`: the live, ordered events of one game
//! - `Journal`: optional JSONL file that records every commit for replay
//!
//! # Architecture
//!
//! ```text
//! Write Path (inside the game's exclusive section):
//! ┌─────────┐    ┌────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ request │───►│ draft event│───►│ journal line │───►│ commit + tally│
//! └─────────┘    └────────────┘    └──────────────┘    └──────────────┘
//!
//! Startup:
//! ┌──────────────────┐    ┌────────────────────────┐
//! │ load journal     │───►│ replay into logs/tally │───► Ready!
//! └──────────────────┘    └────────────────────────┘
//! ```

mod journal;
mod log;

pub use journal::{Journal, JournalConfig, JournalResult};
pub use log::GameLog;
