//! Interactive terminal loop over the derived game state.

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

use chronle_core::{
    AuthSource, FAILED_TO_LOAD_PUZZLE, GameState, ProgressRecord, ProgressSource, PuzzleSource,
    ReadyState, ScoringConfig, Year,
};
use chronle_runtime::{
    DerivationDriver, FileSessionStore, GameSession, InMemoryProgressBackend,
    InMemorySessionStore, ProgressBackend, PuzzleLibrary, SessionStore, SourceFeeds,
    parse_progress,
};

use crate::config::ClientConfig;

pub struct App {
    feeds: Arc<SourceFeeds>,
    driver: DerivationDriver,
    state: watch::Receiver<GameState>,
    session: Option<GameSession>,
    backend: Arc<InMemoryProgressBackend>,
    user_id: Option<String>,
    saved: bool,
}

impl App {
    /// Wire feeds, driver, stores, and the day's puzzle.
    ///
    /// A failed puzzle load still produces a working app: the failure is
    /// published on the puzzle feed and rendered through the normal error
    /// state, the same path a network failure would take.
    pub async fn build(config: ClientConfig) -> Result<Self> {
        let feeds = Arc::new(SourceFeeds::new());
        let driver = DerivationDriver::spawn(feeds.subscribe(), ScoringConfig::default());
        let state = driver.subscribe();
        let backend = Arc::new(InMemoryProgressBackend::new());

        let puzzle = match Self::pick_puzzle(&config) {
            Ok(puzzle) => Some(puzzle),
            Err(error) => {
                tracing::error!(%error, path = %config.puzzles_path.display(), "puzzle load failed");
                feeds.publish_puzzle(PuzzleSource::failed(FAILED_TO_LOAD_PUZZLE));
                None
            }
        };

        match &config.user_id {
            Some(user_id) => {
                feeds.publish_auth(AuthSource::signed_in(user_id.clone()));
                let progress = match &puzzle {
                    Some(puzzle) => match backend.load(user_id, &puzzle.id).await? {
                        Some(raw) => Some(parse_progress(raw)?),
                        None => None,
                    },
                    None => None,
                };
                feeds.publish_progress(ProgressSource::ready(progress));
            }
            None => feeds.publish_auth(AuthSource::anonymous()),
        }

        let session = match &puzzle {
            Some(puzzle) => {
                let store: Arc<dyn SessionStore> = match &config.session_path {
                    Some(path) => Arc::new(FileSessionStore::open(path)?),
                    None => Arc::new(InMemorySessionStore::new()),
                };
                // Resume any session already on disk for this puzzle.
                let record = store.snapshot(&puzzle.id)?;
                feeds.publish_session(&record);
                feeds.publish_puzzle(PuzzleSource::ready(puzzle.clone()));
                Some(GameSession::new(
                    puzzle.clone(),
                    ScoringConfig::default(),
                    store,
                    Arc::clone(&feeds),
                ))
            }
            None => None,
        };

        Ok(Self {
            feeds,
            driver,
            state,
            session,
            backend,
            user_id: config.user_id,
            saved: false,
        })
    }

    fn pick_puzzle(config: &ClientConfig) -> chronle_runtime::Result<chronle_core::Puzzle> {
        let library = PuzzleLibrary::load(&config.puzzles_path)?;
        match config.fixed_year {
            Some(year) => library.by_year(year),
            None => library.daily(chrono::Utc::now().date_naive()),
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        // Separate receiver for the select loop so handlers can borrow self.
        let mut state_rx = self.state.clone();

        let current = state_rx.borrow_and_update().clone();
        self.render(&current).await?;
        println!("Commands: guess <year> | range <start> <end> | hint | state | quit");

        loop {
            tokio::select! {
                changed = state_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let current = state_rx.borrow_and_update().clone();
                    self.render(&current).await?;
                }
                line = lines.next_line() => {
                    match line? {
                        Some(input) => {
                            if !self.handle_command(input.trim()).await {
                                break;
                            }
                        }
                        None => break,
                    }
                }
            }
        }

        // The session holds its own handle to the feeds; both must go
        // before the driver sees its channels close.
        drop(self.session);
        drop(self.feeds);
        self.driver.shutdown().await;
        Ok(())
    }

    /// Returns false when the loop should exit.
    async fn handle_command(&mut self, input: &str) -> bool {
        let mut parts = input.split_whitespace();
        match parts.next() {
            Some("quit") | Some("exit") => return false,
            Some("state") => {
                let current = self.state.borrow().clone();
                if let Err(error) = self.render(&current).await {
                    eprintln!("{error}");
                }
            }
            Some("guess") => match parts.next().map(str::parse::<Year>) {
                Some(Ok(year)) => self.submit_guess(year).await,
                _ => println!("Usage: guess <year> (BC years are negative)"),
            },
            Some("range") => {
                match (
                    parts.next().map(str::parse::<Year>),
                    parts.next().map(str::parse::<Year>),
                ) {
                    (Some(Ok(start)), Some(Ok(end))) => self.submit_range(start, end).await,
                    _ => println!("Usage: range <start> <end>"),
                }
            }
            Some("hint") => self.reveal_hint().await,
            Some("") | None => {}
            Some(other) => println!("Unknown command: {other}"),
        }
        true
    }

    fn current_ready(&self) -> Option<ReadyState> {
        self.state.borrow().as_ready().cloned()
    }

    async fn submit_guess(&self, year: Year) {
        let (Some(session), Some(ready)) = (&self.session, self.current_ready()) else {
            println!("The game is not ready for guesses yet.");
            return;
        };
        match session.submit_guess(&ready, year).await {
            Ok(_) => {
                let target = session.puzzle().target_year;
                if year < target {
                    println!("{year}: later than that.");
                } else if year > target {
                    println!("{year}: earlier than that.");
                }
            }
            Err(error) => println!("{error}"),
        }
    }

    async fn submit_range(&self, start: Year, end: Year) {
        let (Some(session), Some(ready)) = (&self.session, self.current_ready()) else {
            println!("The game is not ready for guesses yet.");
            return;
        };
        match session.submit_range(&ready, start, end).await {
            Ok(range) => println!(
                "Range [{start}, {end}] scored {} points ({} hints used).",
                range.score, range.hints_used
            ),
            Err(error) => println!("{error}"),
        }
    }

    async fn reveal_hint(&self) {
        let (Some(session), Some(ready)) = (&self.session, self.current_ready()) else {
            println!("The game is not ready for hints yet.");
            return;
        };
        match session.reveal_hint(&ready).await {
            Ok((count, text)) => println!("Hint {count}: {text}"),
            Err(error) => println!("{error}"),
        }
    }

    async fn render(&mut self, state: &GameState) -> Result<()> {
        match state {
            GameState::LoadingPuzzle => println!("Loading puzzle..."),
            GameState::LoadingAuth => println!("Checking sign-in..."),
            GameState::LoadingProgress => println!("Loading your progress..."),
            GameState::Error { message } => println!("Error: {message}"),
            GameState::Ready(ready) => self.render_ready(ready).await?,
        }
        Ok(())
    }

    async fn render_ready(&mut self, ready: &ReadyState) -> Result<()> {
        println!();
        println!("Chronle #{}", ready.puzzle.puzzle_number);
        if let Some(event) = ready.puzzle.events.first() {
            println!("  {event}");
        }
        for hint in 1..=ready.hints_revealed {
            if let Some(event) = ready.puzzle.events.get(hint as usize) {
                println!("  Hint {hint}: {event}");
            }
        }
        if !ready.guesses.is_empty() {
            let printed: Vec<String> = ready.guesses.iter().map(|g| g.to_string()).collect();
            println!("  Guesses: {}", printed.join(", "));
        }
        println!(
            "  Remaining: {} guesses, {} range attempts",
            ready.remaining_guesses, ready.remaining_attempts
        );

        if ready.is_complete {
            if ready.has_won {
                println!(
                    "  Solved! The year was {}. Score: {}",
                    ready.puzzle.target_year, ready.total_score
                );
            } else {
                println!("  Game over. The year was {}.", ready.puzzle.target_year);
            }
            self.save_progress(ready).await?;
        }
        Ok(())
    }

    /// Persist the finished attempt for signed-in players.
    async fn save_progress(&mut self, ready: &ReadyState) -> Result<()> {
        let Some(user_id) = &self.user_id else {
            return Ok(());
        };
        if self.saved {
            return Ok(());
        }
        let record = ProgressRecord {
            guesses: ready.guesses.clone(),
            ranges: ready.ranges.clone(),
            total_score: Some(ready.total_score),
            completed_at: Some(chrono::Utc::now().timestamp_millis()),
        };
        self.backend
            .save(user_id, &ready.puzzle.id, &record)
            .await?;
        self.saved = true;
        tracing::info!(user = %user_id, puzzle = %ready.puzzle.id, "progress saved");
        Ok(())
    }
}
