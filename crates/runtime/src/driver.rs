//! Background task that keeps the derived state fresh.
//!
//! The driver is the only place where derivation meets the async world: it
//! waits for any of the four source channels to change, snapshots all of
//! them, runs the pure [`derive`] function, and publishes the result on an
//! output `watch` channel. Transition logging lives here so the core stays
//! side-effect-free.

use tokio::sync::watch;
use tokio::task::JoinHandle;

use chronle_core::{GameState, ScoringConfig, derive};

use crate::sources::SourceReceivers;

/// Handle to the derivation loop.
pub struct DerivationDriver {
    state: watch::Receiver<GameState>,
    task: JoinHandle<()>,
}

impl DerivationDriver {
    /// Spawn the derivation loop over the given source receivers.
    ///
    /// The output channel starts with the state derived from the channels'
    /// seed values (normally `LoadingPuzzle`). The task exits when every
    /// feed sender has been dropped.
    pub fn spawn(mut receivers: SourceReceivers, config: ScoringConfig) -> Self {
        let initial = derive(&receivers.snapshot(), &config);
        let (state_tx, state_rx) = watch::channel(initial);

        let task = tokio::spawn(async move {
            run(&mut receivers, &config, &state_tx).await;
            tracing::debug!("derivation driver stopped");
        });

        Self {
            state: state_rx,
            task,
        }
    }

    /// Subscribe to derived state updates.
    pub fn subscribe(&self) -> watch::Receiver<GameState> {
        self.state.clone()
    }

    pub async fn shutdown(self) {
        drop(self.state);
        let _ = self.task.await;
    }
}

async fn run(
    receivers: &mut SourceReceivers,
    config: &ScoringConfig,
    state_tx: &watch::Sender<GameState>,
) {
    loop {
        let changed = tokio::select! {
            res = receivers.puzzle.changed() => res,
            res = receivers.auth.changed() => res,
            res = receivers.progress.changed() => res,
            res = receivers.session.changed() => res,
        };
        if changed.is_err() {
            // All feed senders dropped.
            return;
        }

        let next = derive(&receivers.snapshot(), config);

        let previous_status = state_tx.borrow().status();
        if next.status() != previous_status {
            tracing::debug!(
                from = previous_status,
                to = next.status(),
                "game state transition"
            );
        }
        if let GameState::Error { message } = &next {
            tracing::warn!(%message, "derivation produced error state");
        }

        if state_tx.send(next).is_err() {
            // No subscribers left.
            return;
        }
    }
}
