//! In-memory SessionStore implementation for tests and anonymous play.

use std::sync::RwLock;

use chronle_core::{RangeGuess, SessionRecord, Year};

use crate::error::{Result, RuntimeError};

use super::SessionStore;

/// In-memory implementation of [`SessionStore`].
pub struct InMemorySessionStore {
    record: RwLock<SessionRecord>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            record: RwLock::new(SessionRecord::default()),
        }
    }

    fn mutate(
        &self,
        puzzle_id: &str,
        apply: impl FnOnce(&mut SessionRecord),
    ) -> Result<SessionRecord> {
        let mut record = self.record.write().map_err(|_| RuntimeError::LockPoisoned)?;
        if record.puzzle_id != puzzle_id {
            *record = SessionRecord::new(puzzle_id);
        }
        apply(&mut record);
        Ok(record.clone())
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for InMemorySessionStore {
    fn record_guess(&self, puzzle_id: &str, year: Year) -> Result<SessionRecord> {
        self.mutate(puzzle_id, |record| record.add_guess(year))
    }

    fn record_range(&self, puzzle_id: &str, range: RangeGuess) -> Result<SessionRecord> {
        self.mutate(puzzle_id, |record| record.add_range(range))
    }

    fn snapshot(&self, puzzle_id: &str) -> Result<SessionRecord> {
        let record = self.record.read().map_err(|_| RuntimeError::LockPoisoned)?;
        if record.puzzle_id == puzzle_id {
            Ok(record.clone())
        } else {
            Ok(SessionRecord::new(puzzle_id))
        }
    }

    fn clear(&self) -> Result<()> {
        let mut record = self.record.write().map_err(|_| RuntimeError::LockPoisoned)?;
        *record = SessionRecord::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_are_monotonic() {
        let store = InMemorySessionStore::new();
        store.record_guess("p1", 1950).unwrap();
        let record = store.record_guess("p1", 1960).unwrap();
        assert_eq!(record.session_guesses, vec![1950, 1960]);
    }

    #[test]
    fn new_puzzle_id_resets_the_record() {
        let store = InMemorySessionStore::new();
        store.record_guess("p1", 1950).unwrap();
        let record = store.record_guess("p2", 1960).unwrap();
        assert_eq!(record.puzzle_id, "p2");
        assert_eq!(record.session_guesses, vec![1960]);
    }

    #[test]
    fn snapshot_for_other_puzzle_reads_empty() {
        let store = InMemorySessionStore::new();
        store.record_guess("p1", 1950).unwrap();
        let record = store.snapshot("p2").unwrap();
        assert!(record.is_empty());
        assert_eq!(record.puzzle_id, "p2");
    }
}
