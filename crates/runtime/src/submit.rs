//! Guess submission action layer.
//!
//! [`GameSession`] sits between a frontend and the session store: it
//! validates a submission against the latest derived state, scores ranges
//! at submission time, appends to the store, and republishes the session
//! snapshot so the driver re-derives. An async mutex keeps one submission
//! in flight at a time, which is the serialization the engine relies on.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;

use chronle_core::{
    Puzzle, RangeGuess, ReadyState, ScoringConfig, SessionRecord, Year, score_range,
};

use crate::error::RuntimeError;
use crate::session::SessionStore;
use crate::sources::SourceFeeds;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("puzzle already completed")]
    Complete,

    #[error("no guesses remaining")]
    OutOfGuesses,

    #[error("no range attempts remaining")]
    OutOfAttempts,

    #[error("range start {start} exceeds end {end}")]
    InvalidRange { start: Year, end: Year },

    #[error("all {total} optional hints already revealed")]
    NoMoreHints { total: u32 },

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// One player's attempt at one puzzle.
pub struct GameSession {
    puzzle: Puzzle,
    config: ScoringConfig,
    store: Arc<dyn SessionStore>,
    feeds: Arc<SourceFeeds>,
    /// Hints revealed this attempt; monotonic, never reset.
    revealed: Mutex<u32>,
}

impl GameSession {
    pub fn new(
        puzzle: Puzzle,
        config: ScoringConfig,
        store: Arc<dyn SessionStore>,
        feeds: Arc<SourceFeeds>,
    ) -> Self {
        Self {
            puzzle,
            config,
            store,
            feeds,
            revealed: Mutex::new(0),
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Reveal the next optional hint and return its text.
    ///
    /// Monotonic: the count only grows, capped at the puzzle's optional
    /// hint count. Ranges already carrying a higher `hints_used` (resumed
    /// games) push the starting point up.
    pub async fn reveal_hint(&self, state: &ReadyState) -> Result<(u32, String), SubmitError> {
        let total = self.puzzle.optional_hints();
        let mut revealed = self.revealed.lock().await;
        *revealed = (*revealed).max(state.hints_revealed);
        if *revealed >= total {
            return Err(SubmitError::NoMoreHints { total });
        }
        *revealed += 1;
        // events[0] is the free opening event; hint n is events[n].
        let text = self
            .puzzle
            .events
            .get(*revealed as usize)
            .cloned()
            .unwrap_or_default();
        Ok((*revealed, text))
    }

    /// Submit a plain year guess.
    pub async fn submit_guess(
        &self,
        state: &ReadyState,
        year: Year,
    ) -> Result<SessionRecord, SubmitError> {
        let _guard = self.revealed.lock().await;
        if state.is_complete {
            return Err(SubmitError::Complete);
        }
        if state.remaining_guesses == 0 {
            return Err(SubmitError::OutOfGuesses);
        }
        let record = self.store.record_guess(&self.puzzle.id, year)?;
        self.feeds.publish_session(&record);
        Ok(record)
    }

    /// Submit a year range, scoring it with the hints revealed so far.
    pub async fn submit_range(
        &self,
        state: &ReadyState,
        start: Year,
        end: Year,
    ) -> Result<RangeGuess, SubmitError> {
        if start > end {
            return Err(SubmitError::InvalidRange { start, end });
        }
        let revealed = self.revealed.lock().await;
        if state.is_complete {
            return Err(SubmitError::Complete);
        }
        if state.remaining_attempts == 0 {
            return Err(SubmitError::OutOfAttempts);
        }

        let hints_used = (*revealed).max(state.hints_revealed);
        let candidate = RangeGuess::new(start, end, hints_used, 0, 0);
        let contained = candidate.contains(self.puzzle.target_year);
        let result = score_range(&self.config, hints_used, candidate.width(), contained);

        let range = RangeGuess::new(
            start,
            end,
            hints_used,
            result.score,
            chrono::Utc::now().timestamp_millis(),
        );
        let record = self.store.record_range(&self.puzzle.id, range.clone())?;
        self.feeds.publish_session(&record);
        Ok(range)
    }
}
