//! Tick and wake orchestration
//!
//! Composes the suppression manager, a selection policy, the asset store and
//! the player. One external trigger equals one `run_tick` call; `run_wake`
//! drains the catch-up gap after a sleep.

use std::path::PathBuf;

use thiserror::Error;
use time::OffsetDateTime;

use crate::domain::chime::{ChimePolicy, ClockReading};
use crate::domain::config::QuietHours;

use super::ports::{AssetStore, ChimePlayer, PlaybackError, StateError, StateStore};
use super::suppression::SuppressionManager;

/// Errors from a tick. Both variants are recoverable: the caller logs the
/// failure and skips the tick rather than crashing the scheduler's
/// invocation chain.
#[derive(Error, Debug)]
pub enum TickError {
    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

/// What a tick decided to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// A cluster was played to completion
    Played(PathBuf),
    /// Announcements are paused until the given instant
    Suppressed(OffsetDateTime),
    /// The tick fell inside the configured quiet hours
    QuietHours,
    /// No sound maps to this minute
    Silent,
    /// Asset absent even after one rebuild attempt; tick abandoned
    AssetMissing(String),
}

/// What a wake pass played and what it had to skip
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WakeReport {
    pub played: Vec<String>,
    pub missing: Vec<String>,
}

/// Per-tick composition of the core components.
pub struct ChimeOrchestrator<'a, S: StateStore> {
    suppression: &'a SuppressionManager<S>,
    policy: &'a dyn ChimePolicy,
    assets: &'a dyn AssetStore,
    player: &'a dyn ChimePlayer,
    quiet_hours: Option<QuietHours>,
}

impl<'a, S: StateStore> ChimeOrchestrator<'a, S> {
    pub fn new(
        suppression: &'a SuppressionManager<S>,
        policy: &'a dyn ChimePolicy,
        assets: &'a dyn AssetStore,
        player: &'a dyn ChimePlayer,
        quiet_hours: Option<QuietHours>,
    ) -> Self {
        Self {
            suppression,
            policy,
            assets,
            player,
            quiet_hours,
        }
    }

    /// Evaluate one tick at `now`.
    ///
    /// Order matters: suppression and quiet hours are checked before any
    /// sound is resolved, and the asset gets exactly one rebuild attempt
    /// before the tick is abandoned.
    pub async fn run_tick(&self, now: OffsetDateTime) -> Result<TickOutcome, TickError> {
        if let Some(until) = self.suppression.is_suppressed(now).await? {
            self.suppression.mark_ran(now).await?;
            return Ok(TickOutcome::Suppressed(until));
        }

        if let Some(span) = self.quiet_hours {
            if span.contains(now.time()) {
                self.suppression.mark_ran(now).await?;
                return Ok(TickOutcome::QuietHours);
            }
        }

        let selection = self.policy.select(ClockReading::from(now));
        let Some(name) = selection.asset_name() else {
            self.suppression.mark_ran(now).await?;
            return Ok(TickOutcome::Silent);
        };

        if !self.assets.exists(&name).await {
            // One rebuild attempt; a missed announcement beats a crashed job
            if self.assets.rebuild_all().await.is_err() || !self.assets.exists(&name).await {
                self.suppression.mark_ran(now).await?;
                return Ok(TickOutcome::AssetMissing(name));
            }
        }

        let path = self.assets.path_of(&name);
        self.player.play(&path).await?;
        self.suppression.mark_ran(now).await?;
        Ok(TickOutcome::Played(path))
    }

    /// Play the hourly chimes missed since the last recorded run.
    ///
    /// Files that do not exist are skipped and reported, not rebuilt: a
    /// wake pass should be quick and quiet about what it cannot do.
    pub async fn run_wake(&self, now: OffsetDateTime) -> Result<WakeReport, TickError> {
        let owed = self.suppression.catch_up_missed_hours(now).await?;

        let mut report = WakeReport::default();
        for selection in owed {
            let Some(name) = selection.asset_name() else {
                continue;
            };
            if self.assets.exists(&name).await {
                self.player.play(&self.assets.path_of(&name)).await?;
                report.played.push(name);
            } else {
                report.missing.push(name);
            }
        }
        Ok(report)
    }
}

impl TickOutcome {
    pub fn describe(&self) -> String {
        match self {
            Self::Played(path) => format!("played {}", path.display()),
            Self::Suppressed(until) => format!("suppressed until {}", until),
            Self::QuietHours => "skipped (quiet hours)".to_string(),
            Self::Silent => "skipped (not a chime time)".to_string(),
            Self::AssetMissing(name) => format!("skipped ({} missing after rebuild)", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chime::{ExactTickPolicy, NearestQuarterPolicy};
    use crate::domain::state::SuppressionRecord;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::path::Path;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;
    use time::macros::datetime;

    #[derive(Default)]
    struct MemoryStore {
        record: Mutex<SuppressionRecord>,
    }

    #[async_trait]
    impl StateStore for MemoryStore {
        async fn load(&self) -> Result<SuppressionRecord, StateError> {
            Ok(self.record.lock().unwrap().clone())
        }

        async fn save(&self, record: &SuppressionRecord) -> Result<(), StateError> {
            *self.record.lock().unwrap() = record.clone();
            Ok(())
        }
    }

    struct FakeAssets {
        present: Mutex<HashSet<String>>,
        rebuild_fills: bool,
        rebuilds: AtomicUsize,
    }

    impl FakeAssets {
        fn complete() -> Self {
            Self {
                present: Mutex::new(
                    crate::domain::chime::required_assets().into_iter().collect(),
                ),
                rebuild_fills: true,
                rebuilds: AtomicUsize::new(0),
            }
        }

        fn empty(rebuild_fills: bool) -> Self {
            Self {
                present: Mutex::new(HashSet::new()),
                rebuild_fills,
                rebuilds: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl AssetStore for FakeAssets {
        fn path_of(&self, name: &str) -> PathBuf {
            PathBuf::from("/assets").join(name)
        }

        async fn exists(&self, name: &str) -> bool {
            self.present.lock().unwrap().contains(name)
        }

        async fn rebuild_all(&self) -> Result<(), super::super::ports::AssetError> {
            self.rebuilds.fetch_add(1, Ordering::SeqCst);
            if self.rebuild_fills {
                let mut present = self.present.lock().unwrap();
                for name in crate::domain::chime::required_assets() {
                    present.insert(name);
                }
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingPlayer {
        played: Mutex<Vec<PathBuf>>,
        fail: AtomicBool,
    }

    #[async_trait]
    impl ChimePlayer for RecordingPlayer {
        async fn play(&self, path: &Path) -> Result<(), PlaybackError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(PlaybackError::PlaybackFailed("boom".to_string()));
            }
            self.played.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }
    }

    fn orchestrator<'a>(
        suppression: &'a SuppressionManager<MemoryStore>,
        policy: &'a dyn ChimePolicy,
        assets: &'a FakeAssets,
        player: &'a RecordingPlayer,
        quiet_hours: Option<QuietHours>,
    ) -> ChimeOrchestrator<'a, MemoryStore> {
        ChimeOrchestrator::new(suppression, policy, assets, player, quiet_hours)
    }

    #[tokio::test]
    async fn top_of_hour_plays_the_completed_hour() {
        let suppression = SuppressionManager::new(MemoryStore::default());
        let assets = FakeAssets::complete();
        let player = RecordingPlayer::default();
        let orch = orchestrator(&suppression, &ExactTickPolicy, &assets, &player, None);

        // 15:00 announces hour 3
        let outcome = orch.run_tick(datetime!(2025-05-07 15:00:00 UTC)).await.unwrap();
        assert_eq!(
            outcome,
            TickOutcome::Played(PathBuf::from("/assets/hour_3.wav"))
        );
        assert_eq!(
            player.played.lock().unwrap().as_slice(),
            &[PathBuf::from("/assets/hour_3.wav")]
        );
    }

    #[tokio::test]
    async fn nearest_policy_plays_the_closest_quarter() {
        let suppression = SuppressionManager::new(MemoryStore::default());
        let assets = FakeAssets::complete();
        let player = RecordingPlayer::default();
        let orch = orchestrator(&suppression, &NearestQuarterPolicy, &assets, &player, None);

        let outcome = orch.run_tick(datetime!(2025-05-07 10:16:00 UTC)).await.unwrap();
        assert_eq!(
            outcome,
            TickOutcome::Played(PathBuf::from("/assets/quarter_1.wav"))
        );
    }

    #[tokio::test]
    async fn off_quarter_minute_is_silent() {
        let suppression = SuppressionManager::new(MemoryStore::default());
        let assets = FakeAssets::complete();
        let player = RecordingPlayer::default();
        let orch = orchestrator(&suppression, &ExactTickPolicy, &assets, &player, None);

        let outcome = orch.run_tick(datetime!(2025-05-07 10:16:00 UTC)).await.unwrap();
        assert_eq!(outcome, TickOutcome::Silent);
        assert!(player.played.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn active_pause_suppresses_the_tick() {
        let until = datetime!(2025-05-07 12:00:00 UTC);
        let store = MemoryStore {
            record: Mutex::new(SuppressionRecord {
                pause_until: Some(until),
                last_run: None,
            }),
        };
        let suppression = SuppressionManager::new(store);
        let assets = FakeAssets::complete();
        let player = RecordingPlayer::default();
        let orch = orchestrator(&suppression, &ExactTickPolicy, &assets, &player, None);

        let outcome = orch.run_tick(datetime!(2025-05-07 10:00:00 UTC)).await.unwrap();
        assert_eq!(outcome, TickOutcome::Suppressed(until));
        assert!(player.played.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn quiet_hours_skip_the_tick() {
        let suppression = SuppressionManager::new(MemoryStore::default());
        let assets = FakeAssets::complete();
        let player = RecordingPlayer::default();
        let span: QuietHours = "22:00-07:00".parse().unwrap();
        let orch = orchestrator(&suppression, &ExactTickPolicy, &assets, &player, Some(span));

        let outcome = orch.run_tick(datetime!(2025-05-07 23:00:00 UTC)).await.unwrap();
        assert_eq!(outcome, TickOutcome::QuietHours);
        assert!(player.played.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_asset_triggers_one_rebuild_then_plays() {
        let suppression = SuppressionManager::new(MemoryStore::default());
        let assets = FakeAssets::empty(true);
        let player = RecordingPlayer::default();
        let orch = orchestrator(&suppression, &ExactTickPolicy, &assets, &player, None);

        let outcome = orch.run_tick(datetime!(2025-05-07 10:15:00 UTC)).await.unwrap();
        assert_eq!(
            outcome,
            TickOutcome::Played(PathBuf::from("/assets/quarter_1.wav"))
        );
        assert_eq!(assets.rebuilds.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn asset_still_missing_abandons_the_tick() {
        let suppression = SuppressionManager::new(MemoryStore::default());
        let assets = FakeAssets::empty(false);
        let player = RecordingPlayer::default();
        let orch = orchestrator(&suppression, &ExactTickPolicy, &assets, &player, None);

        let outcome = orch.run_tick(datetime!(2025-05-07 10:15:00 UTC)).await.unwrap();
        assert_eq!(outcome, TickOutcome::AssetMissing("quarter_1.wav".to_string()));
        assert_eq!(assets.rebuilds.load(Ordering::SeqCst), 1);
        assert!(player.played.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn playback_failure_propagates_as_recoverable_error() {
        let suppression = SuppressionManager::new(MemoryStore::default());
        let assets = FakeAssets::complete();
        let player = RecordingPlayer::default();
        player.fail.store(true, Ordering::SeqCst);
        let orch = orchestrator(&suppression, &ExactTickPolicy, &assets, &player, None);

        let err = orch
            .run_tick(datetime!(2025-05-07 10:15:00 UTC))
            .await
            .unwrap_err();
        assert!(matches!(err, TickError::Playback(_)));
    }

    #[tokio::test]
    async fn wake_plays_missed_hours_in_order() {
        let store = MemoryStore {
            record: Mutex::new(SuppressionRecord {
                pause_until: None,
                last_run: Some(datetime!(2024-01-01 12:00:00 UTC)),
            }),
        };
        let suppression = SuppressionManager::new(store);
        let assets = FakeAssets::complete();
        let player = RecordingPlayer::default();
        let orch = orchestrator(&suppression, &ExactTickPolicy, &assets, &player, None);

        let report = orch.run_wake(datetime!(2024-01-01 15:05:00 UTC)).await.unwrap();
        assert_eq!(
            report.played,
            vec!["hour_1.wav", "hour_2.wav", "hour_3.wav"]
        );
        assert!(report.missing.is_empty());
    }

    #[tokio::test]
    async fn wake_reports_missing_files_without_failing() {
        let store = MemoryStore {
            record: Mutex::new(SuppressionRecord {
                pause_until: None,
                last_run: Some(datetime!(2024-01-01 12:00:00 UTC)),
            }),
        };
        let suppression = SuppressionManager::new(store);
        let assets = FakeAssets::empty(false);
        let player = RecordingPlayer::default();
        let orch = orchestrator(&suppression, &ExactTickPolicy, &assets, &player, None);

        let report = orch.run_wake(datetime!(2024-01-01 15:05:00 UTC)).await.unwrap();
        assert!(report.played.is_empty());
        assert_eq!(
            report.missing,
            vec!["hour_1.wav", "hour_2.wav", "hour_3.wav"]
        );
    }

    #[tokio::test]
    async fn first_wake_is_silent() {
        let suppression = SuppressionManager::new(MemoryStore::default());
        let assets = FakeAssets::complete();
        let player = RecordingPlayer::default();
        let orch = orchestrator(&suppression, &ExactTickPolicy, &assets, &player, None);

        let report = orch.run_wake(datetime!(2024-01-01 15:05:00 UTC)).await.unwrap();
        assert_eq!(report, WakeReport::default());
        assert!(player.played.lock().unwrap().is_empty());
    }
}
