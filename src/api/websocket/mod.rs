//! WebSocket live feed
//!
//! `GET /ws` streams every recorded or undone stat, together with the game's
//! dashboard after the change, to connected scoring tables and displays.
//!
//! ## Features
//! - Optional per-game filter (`?jogo_id=`, or a `subscribe` message)
//! - Sequence ID tracking for gap detection
//! - Lag notification so slow clients refetch `GET /dashboard`

pub mod events;
pub mod handler;
pub mod state;

pub use events::{FeedEvent, FeedMessage};
pub use state::AppState;
