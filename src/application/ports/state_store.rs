//! Persistence port for the suppression record

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::state::SuppressionRecord;

/// Errors from the state persistence primitive.
///
/// Malformed stored data is never an error: adapters must self-heal (drop
/// the bad content, rewrite the file) and return an empty record instead.
/// Only real I/O failures surface here, and callers treat them as a
/// recoverable "skip this tick" condition.
#[derive(Error, Debug)]
pub enum StateError {
    #[error("Failed to read state: {0}")]
    Read(String),

    #[error("Failed to write state: {0}")]
    Write(String),
}

/// Port trait for reading and writing the suppression record
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load the record, or an empty record when none has been written yet.
    async fn load(&self) -> Result<SuppressionRecord, StateError>;

    /// Persist the record in normalized form.
    async fn save(&self, record: &SuppressionRecord) -> Result<(), StateError>;
}
