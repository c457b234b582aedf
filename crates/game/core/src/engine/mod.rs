//! State derivation: four source snapshots in, one [`GameState`] out.
//!
//! [`derive`] is the single source of truth for what the player sees. It is
//! pure, synchronous, and total: whatever the sources hold, it returns a
//! valid `GameState` and never panics. Re-deriving with identical snapshots
//! yields a deep-equal result, so callers may re-invoke it as often as the
//! sources change without locking.

mod errors;
mod reconcile;
mod scoring;

pub use errors::DeriveError;
pub use reconcile::{merge_ranges, reconcile};
pub use scoring::{RangeScore, score_range};

use crate::config::ScoringConfig;
use crate::state::{
    AuthSource, GameState, ProgressSource, Puzzle, RangeGuess, ReadyState, SessionSnapshot,
    SourceSnapshots, Year,
};

/// Shown when the puzzle source resolved without a puzzle or an error.
pub const NO_PUZZLE_AVAILABLE: &str = "No puzzle available";

/// Conventional message for a puzzle fetch failure, published by source
/// adapters through the puzzle error channel.
pub const FAILED_TO_LOAD_PUZZLE: &str = "Failed to load puzzle";

/// Derive the renderable game state from one snapshot of all four sources.
///
/// Loading priority is a strict ladder, first match wins:
/// 1. puzzle still loading
/// 2. puzzle source error
/// 3. puzzle absent
/// 4. auth still loading
/// 5. authenticated and progress still loading
/// 6. compute ready
///
/// Any fault inside the ready computation is converted into the `Error`
/// variant; the message is plain display text for the consumer.
pub fn derive(snapshots: &SourceSnapshots, config: &ScoringConfig) -> GameState {
    if snapshots.puzzle.is_loading {
        return GameState::LoadingPuzzle;
    }
    if let Some(message) = &snapshots.puzzle.error {
        return GameState::Error {
            message: message.clone(),
        };
    }
    let Some(puzzle) = &snapshots.puzzle.puzzle else {
        return GameState::Error {
            message: NO_PUZZLE_AVAILABLE.to_string(),
        };
    };
    if snapshots.auth.is_loading {
        return GameState::LoadingAuth;
    }
    if snapshots.auth.is_authenticated && snapshots.progress.is_loading {
        return GameState::LoadingProgress;
    }

    match derive_ready(
        puzzle,
        &snapshots.auth,
        &snapshots.progress,
        &snapshots.session,
        config,
    ) {
        Ok(ready) => GameState::Ready(ready),
        Err(cause) => GameState::Error {
            message: format!("State derivation failed: {cause}"),
        },
    }
}

/// Compute the ready state. Server data only counts when authenticated:
/// an anonymous player plays purely from the session record.
fn derive_ready(
    puzzle: &Puzzle,
    auth: &AuthSource,
    progress: &ProgressSource,
    session: &SessionSnapshot,
    config: &ScoringConfig,
) -> Result<ReadyState, DeriveError> {
    let record = if auth.is_authenticated {
        progress.progress.as_ref()
    } else {
        None
    };
    let server_guesses: &[Year] = record.map_or(&[], |r| r.guesses.as_slice());
    let server_ranges: &[RangeGuess] = record.map_or(&[], |r| r.ranges.as_slice());

    // Inverted ranges mean the boundary let malformed data through;
    // surface that rather than scoring garbage.
    for range in server_ranges.iter().chain(session.session_ranges.iter()) {
        if range.start > range.end {
            return Err(DeriveError::InvertedRange {
                start: range.start,
                end: range.end,
            });
        }
    }

    let guesses = reconcile(server_guesses, &session.session_guesses, config.max_guesses);
    let ranges = merge_ranges(
        server_ranges,
        &session.session_ranges,
        &guesses,
        config.max_guesses,
    );

    let total_score = record
        .and_then(|r| r.total_score)
        .unwrap_or_else(|| ranges.iter().map(|r| r.score).sum());

    let remaining_guesses = config.max_guesses.saturating_sub(guesses.len()) as u32;
    let remaining_attempts = config.max_guesses.saturating_sub(ranges.len()) as u32;

    let last_guess_correct = guesses.last().is_some_and(|&g| g == puzzle.target_year);
    let server_completed = record.is_some_and(|r| r.is_completed());
    // Single-attempt mode: an explicit range submission ends the game
    // whatever it scored. Synthesized point ranges do not count.
    let range_submitted = !server_ranges.is_empty() || !session.session_ranges.is_empty();

    let is_complete =
        server_completed || last_guess_correct || range_submitted || remaining_attempts == 0;
    let has_won =
        ranges.iter().any(|r| r.score > 0) || (is_complete && last_guess_correct);
    let hints_revealed = ranges.iter().map(|r| r.hints_used).max().unwrap_or(0);

    Ok(ReadyState {
        puzzle: puzzle.clone(),
        guesses,
        ranges,
        total_score,
        is_complete,
        has_won,
        remaining_guesses,
        remaining_attempts,
        hints_revealed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ProgressRecord, PuzzleSource};

    fn moon_landing() -> Puzzle {
        Puzzle::new(
            "1969",
            1969,
            vec![
                "A human walks on another world for the first time.".to_string(),
                "Half a million people gather at a farm in New York.".to_string(),
                "A message travels between two computers on ARPANET.".to_string(),
            ],
            42,
        )
    }

    fn ready_snapshots(puzzle: Puzzle) -> SourceSnapshots {
        SourceSnapshots {
            puzzle: PuzzleSource::ready(puzzle),
            auth: AuthSource::anonymous(),
            progress: ProgressSource::ready(None),
            session: SessionSnapshot::default(),
        }
    }

    #[test]
    fn puzzle_loading_wins_over_everything() {
        let mut snapshots = SourceSnapshots::loading();
        snapshots.auth = AuthSource::signed_in("user-1");
        snapshots.progress = ProgressSource::loading();
        let state = derive(&snapshots, &ScoringConfig::default());
        assert_eq!(state.status(), "loading-puzzle");
    }

    #[test]
    fn puzzle_error_propagates_verbatim() {
        let mut snapshots = ready_snapshots(moon_landing());
        snapshots.puzzle = PuzzleSource::failed(FAILED_TO_LOAD_PUZZLE);
        let state = derive(&snapshots, &ScoringConfig::default());
        assert_eq!(
            state,
            GameState::Error {
                message: "Failed to load puzzle".to_string()
            }
        );
    }

    #[test]
    fn resolved_but_absent_puzzle_is_an_error() {
        let mut snapshots = SourceSnapshots::loading();
        snapshots.puzzle = PuzzleSource {
            puzzle: None,
            is_loading: false,
            error: None,
        };
        let state = derive(&snapshots, &ScoringConfig::default());
        assert_eq!(
            state,
            GameState::Error {
                message: "No puzzle available".to_string()
            }
        );
    }

    #[test]
    fn auth_loading_blocks_after_puzzle_resolves() {
        let mut snapshots = ready_snapshots(moon_landing());
        snapshots.auth = AuthSource::loading();
        let state = derive(&snapshots, &ScoringConfig::default());
        assert_eq!(state.status(), "loading-auth");
    }

    #[test]
    fn progress_loading_only_blocks_authenticated_players() {
        let mut snapshots = ready_snapshots(moon_landing());
        snapshots.progress = ProgressSource::loading();

        snapshots.auth = AuthSource::signed_in("user-1");
        assert_eq!(
            derive(&snapshots, &ScoringConfig::default()).status(),
            "loading-progress"
        );

        snapshots.auth = AuthSource::anonymous();
        assert_eq!(
            derive(&snapshots, &ScoringConfig::default()).status(),
            "ready"
        );
    }

    #[test]
    fn fresh_game_is_ready_and_open() {
        let state = derive(&ready_snapshots(moon_landing()), &ScoringConfig::default());
        let ready = state.as_ready().expect("ready");
        assert!(ready.guesses.is_empty());
        assert!(ready.ranges.is_empty());
        assert!(!ready.is_complete);
        assert!(!ready.has_won);
        assert_eq!(ready.remaining_guesses, 6);
        assert_eq!(ready.remaining_attempts, 6);
        assert_eq!(ready.total_score, 0);
        assert_eq!(ready.hints_revealed, 0);
    }

    #[test]
    fn correct_session_guess_wins_and_completes() {
        let mut snapshots = ready_snapshots(moon_landing());
        snapshots.session.session_guesses = vec![1969];
        let state = derive(&snapshots, &ScoringConfig::default());
        let ready = state.as_ready().expect("ready");
        assert!(ready.is_complete);
        assert!(ready.has_won);
    }

    #[test]
    fn six_wrong_guesses_exhaust_without_win() {
        let mut snapshots = ready_snapshots(moon_landing());
        snapshots.session.session_guesses = vec![1950, 1955, 1960, 1965, 1970, 1975];
        let state = derive(&snapshots, &ScoringConfig::default());
        let ready = state.as_ready().expect("ready");
        assert!(ready.is_complete);
        assert!(!ready.has_won);
        assert_eq!(ready.remaining_guesses, 0);
        assert_eq!(ready.remaining_attempts, 0);
    }

    #[test]
    fn one_range_submission_ends_the_game() {
        let mut snapshots = ready_snapshots(moon_landing());
        // Missed range: scores zero but still terminal (single-attempt mode).
        snapshots.session.session_ranges = vec![RangeGuess::new(1900, 1910, 0, 0, 1)];
        let state = derive(&snapshots, &ScoringConfig::default());
        let ready = state.as_ready().expect("ready");
        assert!(ready.is_complete);
        assert!(!ready.has_won);
        assert_eq!(ready.remaining_attempts, 5);
    }

    #[test]
    fn scored_range_wins() {
        let mut snapshots = ready_snapshots(moon_landing());
        snapshots.session.session_ranges = vec![RangeGuess::new(1960, 1970, 2, 540, 1)];
        let state = derive(&snapshots, &ScoringConfig::default());
        let ready = state.as_ready().expect("ready");
        assert!(ready.is_complete);
        assert!(ready.has_won);
        assert_eq!(ready.total_score, 540);
        assert_eq!(ready.hints_revealed, 2);
    }

    #[test]
    fn server_progress_ignored_for_anonymous_players() {
        let mut snapshots = ready_snapshots(moon_landing());
        snapshots.progress = ProgressSource::ready(Some(ProgressRecord {
            guesses: vec![1969],
            completed_at: Some(1),
            ..ProgressRecord::default()
        }));
        let ready = derive(&snapshots, &ScoringConfig::default());
        let ready = ready.as_ready().expect("ready");
        assert!(ready.guesses.is_empty());
        assert!(!ready.is_complete);
    }

    #[test]
    fn server_completion_is_terminal_for_authenticated_players() {
        let mut snapshots = ready_snapshots(moon_landing());
        snapshots.auth = AuthSource::signed_in("user-1");
        snapshots.progress = ProgressSource::ready(Some(ProgressRecord {
            guesses: vec![1950],
            completed_at: Some(1_700_000_000_000),
            ..ProgressRecord::default()
        }));
        let state = derive(&snapshots, &ScoringConfig::default());
        let ready = state.as_ready().expect("ready");
        assert!(ready.is_complete);
        assert!(!ready.has_won);
    }

    #[test]
    fn server_total_score_is_authoritative() {
        let mut snapshots = ready_snapshots(moon_landing());
        snapshots.auth = AuthSource::signed_in("user-1");
        snapshots.progress = ProgressSource::ready(Some(ProgressRecord {
            ranges: vec![RangeGuess::new(1960, 1970, 0, 900, 1)],
            total_score: Some(750),
            ..ProgressRecord::default()
        }));
        let state = derive(&snapshots, &ScoringConfig::default());
        assert_eq!(state.as_ready().expect("ready").total_score, 750);
    }

    #[test]
    fn server_and_session_guesses_merge_without_double_counting() {
        let mut snapshots = ready_snapshots(moon_landing());
        snapshots.auth = AuthSource::signed_in("user-1");
        snapshots.progress = ProgressSource::ready(Some(ProgressRecord {
            guesses: vec![1960, 1970],
            ..ProgressRecord::default()
        }));
        snapshots.session.session_guesses = vec![1970, 1965];
        let state = derive(&snapshots, &ScoringConfig::default());
        let ready = state.as_ready().expect("ready");
        assert_eq!(ready.guesses, vec![1960, 1970, 1965]);
        assert_eq!(ready.remaining_guesses, 3);
    }

    #[test]
    fn derivation_is_deterministic() {
        let mut snapshots = ready_snapshots(moon_landing());
        snapshots.auth = AuthSource::signed_in("user-1");
        snapshots.progress = ProgressSource::ready(Some(ProgressRecord {
            guesses: vec![1950],
            ranges: vec![RangeGuess::new(1960, 1980, 1, 640, 3)],
            ..ProgressRecord::default()
        }));
        snapshots.session.session_guesses = vec![1955];
        let config = ScoringConfig::default();
        assert_eq!(derive(&snapshots, &config), derive(&snapshots, &config));
    }

    #[test]
    fn inverted_persisted_range_surfaces_as_derivation_failure() {
        let mut snapshots = ready_snapshots(moon_landing());
        snapshots.session.session_ranges = vec![RangeGuess::new(1990, 1980, 0, 0, 0)];
        let state = derive(&snapshots, &ScoringConfig::default());
        assert_eq!(
            state,
            GameState::Error {
                message: "State derivation failed: range start 1990 exceeds end 1980".to_string()
            }
        );
    }

    #[test]
    fn hints_once_revealed_stay_revealed() {
        let mut snapshots = ready_snapshots(moon_landing());
        snapshots.auth = AuthSource::signed_in("user-1");
        snapshots.progress = ProgressSource::ready(Some(ProgressRecord {
            ranges: vec![RangeGuess::new(1900, 1950, 3, 0, 1)],
            ..ProgressRecord::default()
        }));
        snapshots.session.session_ranges = vec![RangeGuess::new(1960, 1970, 1, 640, 2)];
        let state = derive(&snapshots, &ScoringConfig::default());
        assert_eq!(state.as_ready().expect("ready").hints_revealed, 3);
    }
}
