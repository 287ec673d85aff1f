//! Error taxonomy for scoring operations
//!
//! Validation errors are caller mistakes and never retried. `EmptyLog` means
//! there is nothing to undo. `Consistency` signals a broken aggregate
//! invariant and is never corrected silently. `Journal` wraps failures of the
//! optional on-disk journal; a failed write leaves in-memory state untouched.

use crate::types::{GameId, PlayerId};

/// Result type for scoring operations
pub type ScoreResult<T> = Result<T, ScoreError>;

#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("game {0} does not exist")]
    InvalidGame(GameId),

    #[error("player {0} does not exist")]
    InvalidPlayer(PlayerId),

    #[error("unrecognized stat type '{0}'")]
    InvalidType(String),

    #[error("game {0} has no actions to undo")]
    EmptyLog(GameId),

    #[error("aggregate consistency violated: {0}")]
    Consistency(String),

    #[error(transparent)]
    Journal(#[from] JournalError),
}

/// Errors from reading or writing the journal
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("journal IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("journal JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Replay found a record that contradicts the log rebuilt so far
    #[error("journal corrupted at line {line}: {reason}")]
    Corrupted { line: usize, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ScoreError::EmptyLog(GameId(4)).to_string(),
            "game 4 has no actions to undo"
        );
        let journal: ScoreError = JournalError::Corrupted {
            line: 3,
            reason: "bad".into(),
        }
        .into();
        assert_eq!(journal.to_string(), "journal corrupted at line 3: bad");
    }
}
