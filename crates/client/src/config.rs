//! Client configuration from environment variables.

use std::path::PathBuf;

use chronle_core::Year;
use chronle_runtime::default_session_path;

/// Configuration for the terminal client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Path to the puzzle library JSON file.
    pub puzzles_path: PathBuf,

    /// Replay a specific year instead of today's puzzle.
    pub fixed_year: Option<Year>,

    /// Simulated signed-in user; anonymous play when unset.
    pub user_id: Option<String>,

    /// Where the session record is persisted between runs. `None` keeps the
    /// session in memory only.
    pub session_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Load configuration from environment variables:
    /// - `CHRONLE_PUZZLES`: puzzle library path (default `data/puzzles.json`)
    /// - `CHRONLE_YEAR`: replay a specific year
    /// - `CHRONLE_USER`: user id for authenticated play
    /// - `CHRONLE_SESSION`: session file path, or `memory` to disable
    ///   persistence (default: platform data directory)
    pub fn from_env() -> Self {
        let puzzles_path = std::env::var("CHRONLE_PUZZLES")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/puzzles.json"));

        let fixed_year = std::env::var("CHRONLE_YEAR")
            .ok()
            .and_then(|raw| raw.parse().ok());

        let user_id = std::env::var("CHRONLE_USER").ok().filter(|id| !id.is_empty());

        let session_path = match std::env::var("CHRONLE_SESSION") {
            Ok(raw) if raw == "memory" => None,
            Ok(raw) => Some(PathBuf::from(raw)),
            Err(_) => default_session_path(),
        };

        Self {
            puzzles_path,
            fixed_year,
            user_id,
            session_path,
        }
    }
}
