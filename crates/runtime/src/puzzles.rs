//! Puzzle library loading and daily selection.
//!
//! The library file is the content team's format: a JSON document keyed by
//! year, each year carrying its ordered hint list, plus a `meta` block the
//! authoring script maintains.
//!
//! ```json
//! {
//!   "meta": { "total_puzzles": 2, "date_range": "-44-1969" },
//!   "puzzles": {
//!     "-44": ["A dictator is stabbed on the Senate floor."],
//!     "1969": ["A human walks on another world for the first time."]
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use chronle_core::{Puzzle, Year};

use crate::error::{Result, RuntimeError};

/// First day of the daily series; day N plays entry N modulo library size.
const DAILY_EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(2024, 1, 1) {
    Some(date) => date,
    None => unreachable!(),
};

#[derive(Debug, Deserialize)]
struct LibraryFile {
    #[serde(default)]
    meta: Option<LibraryMeta>,
    puzzles: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct LibraryMeta {
    #[serde(default)]
    total_puzzles: Option<usize>,
    #[serde(default)]
    #[allow(dead_code)]
    date_range: Option<String>,
}

struct LibraryEntry {
    year: Year,
    hints: Vec<String>,
}

/// An in-memory puzzle library, ordered by year.
pub struct PuzzleLibrary {
    entries: Vec<LibraryEntry>,
}

impl PuzzleLibrary {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        let file: LibraryFile =
            serde_json::from_str(contents).map_err(|error| RuntimeError::MalformedLibrary {
                reason: error.to_string(),
            })?;

        let mut entries = Vec::with_capacity(file.puzzles.len());
        for (key, hints) in file.puzzles {
            let year: Year = key
                .trim()
                .parse()
                .map_err(|_| RuntimeError::InvalidYearKey { key: key.clone() })?;
            if hints.is_empty() {
                return Err(RuntimeError::MalformedLibrary {
                    reason: format!("year {year} has no hints"),
                });
            }
            entries.push(LibraryEntry { year, hints });
        }
        // BTreeMap ordering is lexicographic on the string keys.
        entries.sort_by_key(|entry| entry.year);

        if let Some(total) = file.meta.and_then(|meta| meta.total_puzzles)
            && total != entries.len()
        {
            tracing::warn!(
                declared = total,
                actual = entries.len(),
                "puzzle library meta.total_puzzles is stale"
            );
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Puzzle for a specific year, for replaying past days.
    pub fn by_year(&self, year: Year) -> Result<Puzzle> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.year == year)
            .ok_or(RuntimeError::UnknownYear { year })?;
        Ok(self.puzzle_at(index, index as u32 + 1))
    }

    /// The day's puzzle. Deterministic for a fixed date and library: the
    /// puzzle number is the day count since the series epoch, and the entry
    /// is that number modulo the library size.
    pub fn daily(&self, date: NaiveDate) -> Result<Puzzle> {
        if self.entries.is_empty() {
            return Err(RuntimeError::EmptyLibrary);
        }
        let days = (date - DAILY_EPOCH).num_days().max(0);
        let index = (days as usize) % self.entries.len();
        Ok(self.puzzle_at(index, days as u32 + 1))
    }

    fn puzzle_at(&self, index: usize, number: u32) -> Puzzle {
        let entry = &self.entries[index];
        Puzzle::new(
            entry.year.to_string(),
            entry.year,
            entry.hints.clone(),
            number,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIBRARY: &str = r#"{
        "meta": { "total_puzzles": 3, "date_range": "-44-1969" },
        "puzzles": {
            "-44": ["A dictator is stabbed on the Senate floor."],
            "1903": ["Two brothers fly over a beach in North Carolina."],
            "1969": ["A human walks on another world for the first time.", "Half a million gather at a farm in New York."]
        }
    }"#;

    #[test]
    fn loads_and_orders_by_numeric_year() {
        let library = PuzzleLibrary::from_json_str(LIBRARY).unwrap();
        assert_eq!(library.len(), 3);
        let caesar = library.by_year(-44).unwrap();
        assert_eq!(caesar.target_year, -44);
        assert_eq!(caesar.puzzle_number, 1);
    }

    #[test]
    fn daily_selection_is_deterministic() {
        let library = PuzzleLibrary::from_json_str(LIBRARY).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let a = library.daily(date).unwrap();
        let b = library.daily(date).unwrap();
        assert_eq!(a, b);
        // Day 4 since epoch, 3 entries: index 1.
        assert_eq!(a.target_year, 1903);
        assert_eq!(a.puzzle_number, 5);
    }

    #[test]
    fn invalid_year_key_is_rejected() {
        let result = PuzzleLibrary::from_json_str(r#"{ "puzzles": { "soon": ["x"] } }"#);
        assert!(matches!(result, Err(RuntimeError::InvalidYearKey { .. })));
    }

    #[test]
    fn year_without_hints_is_rejected() {
        let result = PuzzleLibrary::from_json_str(r#"{ "puzzles": { "1969": [] } }"#);
        assert!(matches!(result, Err(RuntimeError::MalformedLibrary { .. })));
    }

    #[test]
    fn empty_library_has_no_daily_puzzle() {
        let library = PuzzleLibrary::from_json_str(r#"{ "puzzles": {} }"#).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(matches!(
            library.daily(date),
            Err(RuntimeError::EmptyLibrary)
        ));
    }
}
