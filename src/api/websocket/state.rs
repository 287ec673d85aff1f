//! Shared application state

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;

use super::events::{FeedEvent, FeedMessage};
use crate::scoreboard::Scoreboard;

/// State shared by every handler
pub struct AppState {
    pub scoreboard: Arc<Scoreboard>,

    /// Broadcast channel for the live feed
    pub feed_tx: broadcast::Sender<FeedMessage>,

    /// Monotonically increasing sequence counter
    pub sequence_counter: AtomicU64,
}

impl AppState {
    /// Create state with the default feed buffer (1024 messages)
    pub fn new(scoreboard: Arc<Scoreboard>) -> Self {
        Self::with_capacity(scoreboard, 1024)
    }

    /// Slow subscribers that fall more than `capacity` messages behind are
    /// told they lagged and should refetch the dashboard
    pub fn with_capacity(scoreboard: Arc<Scoreboard>, capacity: usize) -> Self {
        let (feed_tx, _) = broadcast::channel(capacity.max(1));

        Self {
            scoreboard,
            feed_tx,
            sequence_counter: AtomicU64::new(0),
        }
    }

    /// Publish a feed event to all subscribers
    pub fn publish(&self, event: FeedEvent) {
        let seq = self.sequence_counter.fetch_add(1, Ordering::SeqCst);
        let msg = FeedMessage {
            event,
            sequence_id: seq,
            timestamp: chrono::Utc::now().timestamp(),
        };

        // No receivers is not an error
        let _ = self.feed_tx.send(msg);
    }

    /// Get the current sequence ID
    pub fn current_sequence_id(&self) -> u64 {
        self.sequence_counter.load(Ordering::SeqCst)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FeedMessage> {
        self.feed_tx.subscribe()
    }
}
