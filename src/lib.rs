//! Scorebook
//!
//! Live basketball scorekeeping: operators record plays per player during a
//! game, and every scoring table sees the same running totals and leaders.
//!
//! # Features
//!
//! - **Append-only log**: one ordered event log per game, sequence numbers never reused
//! - **Incremental aggregates**: totals, leaders and points kept in step with the log
//! - **Atomic undo**: the newest live event leaves the log and the tally in one step
//! - **Per-game locking**: games never block each other; dashboards read concurrently
//! - **Replayable journal**: optional JSONL file rebuilds all state at startup
//!
//! # Modules
//!
//! - `types`: Core data structures (StatEvent, StatType, Dashboard)
//! - `event_store`: Per-game log and the on-disk journal
//! - `aggregator`: Totals and leaders derived from the log
//! - `scoreboard`: Record, undo and dashboard operations behind per-game locks
//! - `directory`: Roster and game lookup
//! - `api`: Axum REST endpoints and WebSocket live feed
//! - `config`: Environment-based server configuration
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use scorebook::{Scoreboard, StaticDirectory};
//! use scorebook::types::{GameId, PlayerId};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let directory = Arc::new(StaticDirectory::from_file("roster.json")?);
//!     let scoreboard = Scoreboard::new(directory);
//!
//!     scoreboard.record(GameId(1), PlayerId(1), "+2")?;
//!     scoreboard.record(GameId(1), PlayerId(2), "rebote")?;
//!     scoreboard.undo_last(GameId(1))?;
//!
//!     let dashboard = scoreboard.dashboard(GameId(1))?;
//!     println!("{}", serde_json::to_string(&dashboard)?);
//!     Ok(())
//! }
//! ```

pub mod aggregator;
pub mod api;
pub mod config;
pub mod directory;
pub mod error;
pub mod event_store;
pub mod scoreboard;
pub mod types;

// Re-export commonly used items at crate root
pub use aggregator::Tally;
pub use config::ServerConfig;
pub use directory::{Directory, StaticDirectory};
pub use error::{JournalError, ScoreError, ScoreResult};
pub use scoreboard::{ReplaySummary, ScoreChange, Scoreboard};
pub use types::{Dashboard, GameId, Leader, PlayerId, StatEvent, StatType};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
