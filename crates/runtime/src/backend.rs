//! Asynchronous abstraction over progress persistence.
//!
//! The real deployment talks to a live-query backend; tests and offline
//! play use the in-memory implementation. Either way the payload crosses
//! the boundary as raw JSON and goes through
//! [`parse_progress`](crate::progress::parse_progress) before derivation
//! sees it.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use chronle_core::ProgressRecord;

use crate::error::{Result, RuntimeError};

/// Storage contract for server-persisted progress, keyed by user and puzzle.
#[async_trait]
pub trait ProgressBackend: Send + Sync {
    /// Fetch the raw progress payload, `None` when the user has none for
    /// this puzzle.
    async fn load(&self, user_id: &str, puzzle_id: &str) -> Result<Option<serde_json::Value>>;

    /// Persist a progress record.
    async fn save(&self, user_id: &str, puzzle_id: &str, record: &ProgressRecord) -> Result<()>;
}

/// In-memory implementation for tests and local play.
pub struct InMemoryProgressBackend {
    records: RwLock<HashMap<(String, String), ProgressRecord>>,
}

impl InMemoryProgressBackend {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryProgressBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProgressBackend for InMemoryProgressBackend {
    async fn load(&self, user_id: &str, puzzle_id: &str) -> Result<Option<serde_json::Value>> {
        let records = self.records.read().await;
        match records.get(&(user_id.to_string(), puzzle_id.to_string())) {
            Some(record) => {
                let value =
                    serde_json::to_value(record).map_err(RuntimeError::ProgressEncoding)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, user_id: &str, puzzle_id: &str, record: &ProgressRecord) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(
            (user_id.to_string(), puzzle_id.to_string()),
            record.clone(),
        );
        Ok(())
    }
}
