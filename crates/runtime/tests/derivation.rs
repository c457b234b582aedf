//! End-to-end derivation through the feeds and driver.

use std::time::Duration;

use tokio::sync::watch;

use chronle_core::{
    AuthSource, GameState, ProgressRecord, ProgressSource, Puzzle, PuzzleSource, RangeGuess,
    ScoringConfig, SessionRecord,
};
use chronle_runtime::{DerivationDriver, SourceFeeds};

fn moon_landing() -> Puzzle {
    Puzzle::new(
        "1969",
        1969,
        vec![
            "A human walks on another world for the first time.".to_string(),
            "Half a million people gather at a farm in New York.".to_string(),
        ],
        42,
    )
}

async fn next_state(rx: &mut watch::Receiver<GameState>) -> GameState {
    tokio::time::timeout(Duration::from_secs(1), rx.changed())
        .await
        .expect("state update within a second")
        .expect("driver alive");
    rx.borrow().clone()
}

#[tokio::test]
async fn driver_walks_the_loading_ladder_in_order() {
    let feeds = SourceFeeds::new();
    let driver = DerivationDriver::spawn(feeds.subscribe(), ScoringConfig::default());
    let mut state = driver.subscribe();

    assert_eq!(state.borrow().status(), "loading-puzzle");

    feeds.publish_puzzle(PuzzleSource::ready(moon_landing()));
    assert_eq!(next_state(&mut state).await.status(), "loading-auth");

    feeds.publish_auth(AuthSource::signed_in("user-1"));
    assert_eq!(next_state(&mut state).await.status(), "loading-progress");

    feeds.publish_progress(ProgressSource::ready(None));
    let ready = next_state(&mut state).await;
    assert_eq!(ready.status(), "ready");
    let ready = ready.as_ready().expect("ready");
    assert_eq!(ready.remaining_guesses, 6);
    assert!(!ready.is_complete);
}

#[tokio::test]
async fn anonymous_players_skip_the_progress_wait() {
    let feeds = SourceFeeds::new();
    let driver = DerivationDriver::spawn(feeds.subscribe(), ScoringConfig::default());
    let mut state = driver.subscribe();

    feeds.publish_puzzle(PuzzleSource::ready(moon_landing()));
    next_state(&mut state).await;

    // Progress never resolves, but anonymous play does not wait on it.
    feeds.publish_auth(AuthSource::anonymous());
    assert_eq!(next_state(&mut state).await.status(), "ready");
}

#[tokio::test]
async fn session_publish_triggers_rederivation() {
    let feeds = SourceFeeds::new();
    let driver = DerivationDriver::spawn(feeds.subscribe(), ScoringConfig::default());
    let mut state = driver.subscribe();

    feeds.publish_puzzle(PuzzleSource::ready(moon_landing()));
    next_state(&mut state).await;
    feeds.publish_auth(AuthSource::anonymous());
    next_state(&mut state).await;

    let mut record = SessionRecord::new("1969");
    record.add_guess(1969);
    feeds.publish_session(&record);

    let ready = next_state(&mut state).await;
    let ready = ready.as_ready().expect("ready");
    assert!(ready.is_complete);
    assert!(ready.has_won);
    assert_eq!(ready.guesses, vec![1969]);
}

#[tokio::test]
async fn server_and_session_data_merge_without_double_counting() {
    let feeds = SourceFeeds::new();
    let driver = DerivationDriver::spawn(feeds.subscribe(), ScoringConfig::default());
    let mut state = driver.subscribe();

    feeds.publish_puzzle(PuzzleSource::ready(moon_landing()));
    next_state(&mut state).await;
    feeds.publish_auth(AuthSource::signed_in("user-1"));
    next_state(&mut state).await;
    feeds.publish_progress(ProgressSource::ready(Some(ProgressRecord {
        guesses: vec![1960, 1970],
        ..ProgressRecord::default()
    })));
    next_state(&mut state).await;

    let mut record = SessionRecord::new("1969");
    record.add_guess(1970);
    record.add_guess(1965);
    feeds.publish_session(&record);

    let ready = next_state(&mut state).await;
    let ready = ready.as_ready().expect("ready");
    assert_eq!(ready.guesses, vec![1960, 1970, 1965]);
}

#[tokio::test]
async fn inverted_session_range_surfaces_as_error_state() {
    let feeds = SourceFeeds::new();
    let driver = DerivationDriver::spawn(feeds.subscribe(), ScoringConfig::default());
    let mut state = driver.subscribe();

    feeds.publish_puzzle(PuzzleSource::ready(moon_landing()));
    next_state(&mut state).await;
    feeds.publish_auth(AuthSource::anonymous());
    next_state(&mut state).await;

    let mut record = SessionRecord::new("1969");
    record.add_range(RangeGuess::new(1990, 1980, 0, 0, 0));
    feeds.publish_session(&record);

    match next_state(&mut state).await {
        GameState::Error { message } => {
            assert!(message.starts_with("State derivation failed:"), "{message}");
        }
        other => panic!("expected error state, got {}", other.status()),
    }
}

#[tokio::test]
async fn driver_stops_when_feeds_drop() {
    let feeds = SourceFeeds::new();
    let driver = DerivationDriver::spawn(feeds.subscribe(), ScoringConfig::default());
    drop(feeds);
    tokio::time::timeout(Duration::from_secs(1), driver.shutdown())
        .await
        .expect("driver exits once all feeds are gone");
}
