//! JSON file state store with write-through self-healing
//!
//! The record favors availability over fidelity: malformed JSON, wrong
//! shapes, unparseable timestamps, unknown keys, and oversized files are
//! all discarded and the file rewritten in normalized form. Only real I/O
//! failures surface as errors.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tokio::fs;

use crate::application::ports::{StateError, StateStore};
use crate::domain::state::SuppressionRecord;
use crate::infrastructure::paths;

const STATE_FILE: &str = "state.json";

/// Anything larger than this is treated as corrupt and reset, not parsed.
const MAX_STATE_BYTES: usize = 8 * 1024;

/// File-backed state store, one JSON object per deployment.
pub struct JsonStateStore {
    path: PathBuf,
}

impl JsonStateStore {
    /// Store under the default data directory.
    pub fn new() -> Self {
        Self {
            path: paths::data_dir().join(STATE_FILE),
        }
    }

    /// Store at an explicit file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Discard whatever is on disk and persist an empty record.
    async fn reset(&self) -> Result<SuppressionRecord, StateError> {
        let empty = SuppressionRecord::empty();
        self.save(&empty).await?;
        Ok(empty)
    }
}

impl Default for JsonStateStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull one RFC 3339 field out of the raw document. Anything that is not a
/// parseable timestamp string counts as damage and marks the record dirty.
fn take_timestamp(
    map: &serde_json::Map<String, Value>,
    key: &str,
    dirty: &mut bool,
) -> Option<OffsetDateTime> {
    match map.get(key) {
        None => None,
        Some(Value::String(s)) => match OffsetDateTime::parse(s, &Rfc3339) {
            Ok(ts) => Some(ts),
            Err(_) => {
                *dirty = true;
                None
            }
        },
        Some(_) => {
            *dirty = true;
            None
        }
    }
}

#[async_trait]
impl StateStore for JsonStateStore {
    async fn load(&self) -> Result<SuppressionRecord, StateError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(SuppressionRecord::empty()),
            Err(e) => return Err(StateError::Read(e.to_string())),
        };

        if bytes.len() > MAX_STATE_BYTES {
            return self.reset().await;
        }

        let Ok(value) = serde_json::from_slice::<Value>(&bytes) else {
            return self.reset().await;
        };
        let Value::Object(map) = value else {
            return self.reset().await;
        };

        let mut dirty = map
            .keys()
            .any(|k| k != "pause_until" && k != "last_run");
        let record = SuppressionRecord {
            pause_until: take_timestamp(&map, "pause_until", &mut dirty),
            last_run: take_timestamp(&map, "last_run", &mut dirty),
        };

        if dirty {
            self.save(&record).await?;
        }
        Ok(record)
    }

    async fn save(&self, record: &SuppressionRecord) -> Result<(), StateError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StateError::Write(e.to_string()))?;
        }
        let content = serde_json::to_string_pretty(record)
            .map_err(|e| StateError::Write(e.to_string()))?;
        fs::write(&self.path, content)
            .await
            .map_err(|e| StateError::Write(e.to_string()))
    }
}
