//! Watch-channel feeds for the four input sources.
//!
//! Each source publishes snapshots into its own `watch` channel; the
//! derivation driver subscribes to all four and re-derives on any change.
//! Channels are seeded with loading states so the first derivation lands on
//! `LoadingPuzzle` before any adapter has reported in.

use tokio::sync::watch;

use chronle_core::{
    AuthSource, ProgressSource, PuzzleSource, SessionRecord, SessionSnapshot, SourceSnapshots,
};

/// Sending side of all four source channels.
///
/// Owned by the composition root; adapters publish through it. Dropping the
/// feeds shuts the derivation driver down.
pub struct SourceFeeds {
    puzzle: watch::Sender<PuzzleSource>,
    auth: watch::Sender<AuthSource>,
    progress: watch::Sender<ProgressSource>,
    session: watch::Sender<SessionSnapshot>,
}

/// Receiving side handed to the derivation driver.
pub struct SourceReceivers {
    pub puzzle: watch::Receiver<PuzzleSource>,
    pub auth: watch::Receiver<AuthSource>,
    pub progress: watch::Receiver<ProgressSource>,
    pub session: watch::Receiver<SessionSnapshot>,
}

impl SourceFeeds {
    pub fn new() -> Self {
        Self {
            puzzle: watch::channel(PuzzleSource::loading()).0,
            auth: watch::channel(AuthSource::loading()).0,
            progress: watch::channel(ProgressSource::loading()).0,
            session: watch::channel(SessionSnapshot::default()).0,
        }
    }

    pub fn subscribe(&self) -> SourceReceivers {
        SourceReceivers {
            puzzle: self.puzzle.subscribe(),
            auth: self.auth.subscribe(),
            progress: self.progress.subscribe(),
            session: self.session.subscribe(),
        }
    }

    pub fn publish_puzzle(&self, source: PuzzleSource) {
        self.puzzle.send_replace(source);
    }

    pub fn publish_auth(&self, source: AuthSource) {
        self.auth.send_replace(source);
    }

    pub fn publish_progress(&self, source: ProgressSource) {
        self.progress.send_replace(source);
    }

    pub fn publish_session(&self, record: &SessionRecord) {
        self.session.send_replace(SessionSnapshot::from(record));
    }

    /// Reset the session channel, used when the puzzle id changes.
    pub fn clear_session(&self) {
        self.session.send_replace(SessionSnapshot::default());
    }
}

impl Default for SourceFeeds {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceReceivers {
    /// Capture the current value of every channel, marking them seen.
    pub fn snapshot(&mut self) -> SourceSnapshots {
        SourceSnapshots {
            puzzle: self.puzzle.borrow_and_update().clone(),
            auth: self.auth.borrow_and_update().clone(),
            progress: self.progress.borrow_and_update().clone(),
            session: self.session.borrow_and_update().clone(),
        }
    }
}
