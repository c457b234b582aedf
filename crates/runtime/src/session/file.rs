//! JSON-file SessionStore, the local-storage analog for the terminal client.
//!
//! The record is kept in memory behind a lock and flushed to disk after
//! every mutation. Writes go through a sibling temp file and an atomic
//! rename so a crash mid-write never leaves a torn record behind.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chronle_core::{RangeGuess, SessionRecord, Year};

use crate::error::{Result, RuntimeError};

use super::SessionStore;

pub struct FileSessionStore {
    path: PathBuf,
    record: RwLock<SessionRecord>,
}

impl FileSessionStore {
    /// Open a store at `path`, loading any existing record.
    ///
    /// An unreadable or malformed file is treated as an empty session: the
    /// session is ephemeral by contract, so losing it is recoverable while
    /// refusing to start is not.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let record = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(record) => record,
                Err(error) => {
                    tracing::warn!(%error, path = %path.display(), "discarding malformed session file");
                    SessionRecord::default()
                }
            },
            Err(_) => SessionRecord::default(),
        };
        Ok(Self {
            path,
            record: RwLock::new(record),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, record: &SessionRecord) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let encoded =
            serde_json::to_vec_pretty(record).map_err(RuntimeError::SessionEncoding)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, encoded)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
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
        self.flush(&record)?;
        Ok(record.clone())
    }
}

impl SessionStore for FileSessionStore {
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
        let _ = fs::remove_file(&self.path);
        Ok(())
    }
}
