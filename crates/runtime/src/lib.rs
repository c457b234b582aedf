//! Reactive wiring around the pure derivation engine.
//!
//! `chronle-runtime` owns everything the core deliberately does not: the
//! four source feeds and the driver task that re-derives [`GameState`] on
//! every change, the session store (the one mutable shared resource), the
//! progress boundary that validates duck-typed server payloads, the
//! guess-submission action layer, and the puzzle library loader.
//!
//! Modules are organized by responsibility:
//! - [`sources`] and [`driver`] hold the watch channels and the re-derive
//!   loop
//! - [`session`] and [`backend`] persist session and progress data
//! - [`submit`] validates and scores submissions
//! - [`puzzles`] loads the daily puzzle library
//!
//! [`GameState`]: chronle_core::GameState

pub mod backend;
pub mod driver;
pub mod error;
pub mod progress;
pub mod puzzles;
pub mod session;
pub mod sources;
pub mod submit;

pub use backend::{InMemoryProgressBackend, ProgressBackend};
pub use driver::DerivationDriver;
pub use error::{Result, RuntimeError};
pub use progress::parse_progress;
pub use puzzles::PuzzleLibrary;
pub use session::{FileSessionStore, InMemorySessionStore, SessionStore, default_session_path};
pub use sources::{SourceFeeds, SourceReceivers};
pub use submit::{GameSession, SubmitError};
