//! Suppression state manager
//!
//! Decides whether output is currently suppressed and maintains the
//! wake/gap-catchup bookkeeping on top of the persistence port.

use thiserror::Error;
use time::{Duration, OffsetDateTime};

use crate::domain::chime::{missed_hour_boundaries, SoundSelection};
use crate::domain::error::NonPositivePauseError;

use super::ports::{StateError, StateStore};

/// How long a pause should last: relative to "now" or an absolute instant.
#[derive(Debug, Clone, Copy)]
pub enum PauseSpec {
    For(Duration),
    Until(OffsetDateTime),
}

/// Errors from pause operations
#[derive(Error, Debug)]
pub enum PauseError {
    #[error(transparent)]
    NonPositive(#[from] NonPositivePauseError),

    #[error(transparent)]
    State(#[from] StateError),
}

/// Suppression and catch-up bookkeeping over a [`StateStore`].
pub struct SuppressionManager<S> {
    store: S,
}

impl<S: StateStore> SuppressionManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Whether announcements are suppressed at `now`.
    ///
    /// Returns the expiry while the pause is active (`now` strictly before
    /// it). An expired pause is removed from the record on the spot, so a
    /// `pause_until` field never dangles.
    pub async fn is_suppressed(
        &self,
        now: OffsetDateTime,
    ) -> Result<Option<OffsetDateTime>, StateError> {
        let mut record = self.store.load().await?;
        match record.pause_until {
            None => Ok(None),
            Some(until) if now >= until => {
                record.pause_until = None;
                self.store.save(&record).await?;
                Ok(None)
            }
            Some(until) => Ok(Some(until)),
        }
    }

    /// Persist a pause and return its absolute expiry.
    pub async fn set_pause(
        &self,
        now: OffsetDateTime,
        spec: PauseSpec,
    ) -> Result<OffsetDateTime, PauseError> {
        let until = match spec {
            PauseSpec::For(d) => {
                if d <= Duration::ZERO {
                    return Err(NonPositivePauseError {
                        minutes: d.whole_minutes(),
                    }
                    .into());
                }
                now + d
            }
            PauseSpec::Until(at) => at,
        };
        let mut record = self.store.load().await?;
        record.pause_until = Some(until);
        self.store.save(&record).await?;
        Ok(until)
    }

    /// Remove any pause. Returns whether one was set; clearing an
    /// already-clear record is not an error and leaves it untouched.
    pub async fn clear_pause(&self) -> Result<bool, StateError> {
        let mut record = self.store.load().await?;
        if record.pause_until.is_none() {
            return Ok(false);
        }
        record.pause_until = None;
        self.store.save(&record).await?;
        Ok(true)
    }

    /// Hourly chimes owed for the gap since the last recorded run.
    ///
    /// On the first invocation ever there is no baseline, so nothing is
    /// owed (no retroactive noise on a fresh install). Either way `now`
    /// becomes the new `last_run`, so each call consumes the gap once.
    pub async fn catch_up_missed_hours(
        &self,
        now: OffsetDateTime,
    ) -> Result<Vec<SoundSelection>, StateError> {
        let mut record = self.store.load().await?;
        let owed = match record.last_run {
            None => Vec::new(),
            Some(last_run) => missed_hour_boundaries(last_run, now),
        };
        record.last_run = Some(now);
        self.store.save(&record).await?;
        Ok(owed)
    }

    /// Record a successfully evaluated tick so later catch-up passes do not
    /// replay hours that already sounded.
    pub async fn mark_ran(&self, now: OffsetDateTime) -> Result<(), StateError> {
        let mut record = self.store.load().await?;
        record.last_run = Some(now);
        self.store.save(&record).await
    }

    /// Peek at the stored pause expiry without repairing anything.
    pub async fn pause_until(&self) -> Result<Option<OffsetDateTime>, StateError> {
        Ok(self.store.load().await?.pause_until)
    }
}
