//! Persisted suppression record

use serde::Serialize;
use time::OffsetDateTime;

/// The durable state behind suppression and wake catch-up.
///
/// Both fields are optional; the record is created lazily on first write and
/// always rewritten in this normalized shape (unknown keys and malformed
/// fields from manual edits do not survive a load/save cycle).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SuppressionRecord {
    /// Announcements are suppressed while "now" is strictly before this.
    #[serde(
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub pause_until: Option<OffsetDateTime>,

    /// Last time a tick was successfully evaluated; gaps against "now"
    /// indicate missed hourly chimes (machine asleep or powered off).
    #[serde(
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_run: Option<OffsetDateTime>,
}

impl SuppressionRecord {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pause_until.is_none() && self.last_run.is_none()
    }
}
