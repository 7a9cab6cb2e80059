//! Command handlers wiring adapters into the use cases

use std::path::PathBuf;

use time::macros::format_description;
use time::{Duration, OffsetDateTime, Time};

use crate::application::ports::{AssetStore, ConfigStore, SchedulerCtl};
use crate::application::{
    run_uninstall, ChimeOrchestrator, ConflictChoice, InstallOutcome, PauseSpec,
    SuppressionManager, TickOutcome,
};
use crate::domain::chime::{next_tick, ChimePolicy, ExactTickPolicy, NearestQuarterPolicy};
use crate::domain::config::AppConfig;
use crate::domain::error::PauseParseError;
use crate::infrastructure::{
    create_player, ClusterLibrary, FfmpegEncoder, JsonStateStore, LaunchdScheduler,
    XdgConfigStore, LAUNCHD_LABEL,
};
use crate::infrastructure::paths;

use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Local wall-clock "now"; scheduling is a local-time concept. Falls back
/// to UTC when the local offset cannot be determined (sandboxed processes).
pub fn now_local() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Resolve a `pause --until HH:MM` expression against `now`: today at that
/// time, or tomorrow when it has already passed.
pub fn parse_pause_until(
    input: &str,
    now: OffsetDateTime,
) -> Result<OffsetDateTime, PauseParseError> {
    let err = || PauseParseError {
        input: input.to_string(),
    };
    let (h, m) = input.split_once(':').ok_or_else(err)?;
    let hour: u8 = h.trim().parse().map_err(|_| err())?;
    let minute: u8 = m.trim().parse().map_err(|_| err())?;
    let at = Time::from_hms(hour, minute, 0).map_err(|_| err())?;

    let mut target = now.replace_time(at);
    if target <= now {
        target += Duration::days(1);
    }
    Ok(target)
}

async fn load_effective_config(presenter: &Presenter) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            presenter.warn(&format!("Ignoring unreadable config: {}", e));
            AppConfig::empty()
        }
    };
    AppConfig::defaults().merge(file_config)
}

fn cluster_library(config: &AppConfig) -> ClusterLibrary {
    ClusterLibrary::new(paths::data_dir(), FfmpegEncoder::new(), config)
}

/// Shared body of `tick` and `play`: same pipeline, different policy.
async fn run_chime(policy: &dyn ChimePolicy, presenter: &Presenter) -> u8 {
    let config = load_effective_config(presenter).await;
    let store = JsonStateStore::new();
    let suppression = SuppressionManager::new(store);
    let library = cluster_library(&config);
    let player = create_player(config.player_or_default());

    let orchestrator = ChimeOrchestrator::new(
        &suppression,
        policy,
        &library,
        player.as_ref(),
        config.quiet_hours_or_none(),
    );

    match orchestrator.run_tick(now_local()).await {
        Ok(outcome) => {
            if let TickOutcome::AssetMissing(ref name) = outcome {
                presenter.warn(&format!("{} missing after rebuild; chime skipped", name));
            }
            presenter.debug(&outcome.describe());
            EXIT_SUCCESS
        }
        Err(e) => {
            // A missed announcement beats breaking the scheduler's chain
            presenter.warn(&format!("Chime skipped: {}", e));
            EXIT_SUCCESS
        }
    }
}

/// One scheduler-driven tick at the exact minute.
pub async fn run_tick(presenter: &Presenter) -> u8 {
    run_chime(&ExactTickPolicy, presenter).await
}

/// Manual "chime right now", rounded to the nearest quarter.
pub async fn run_play(presenter: &Presenter) -> u8 {
    run_chime(&NearestQuarterPolicy, presenter).await
}

/// Catch up on the hourly chimes missed during a sleep gap.
pub async fn run_wake(presenter: &Presenter) -> u8 {
    let config = load_effective_config(presenter).await;
    let store = JsonStateStore::new();
    let suppression = SuppressionManager::new(store);
    let library = cluster_library(&config);
    let player = create_player(config.player_or_default());

    let orchestrator = ChimeOrchestrator::new(
        &suppression,
        &ExactTickPolicy,
        &library,
        player.as_ref(),
        config.quiet_hours_or_none(),
    );

    match orchestrator.run_wake(now_local()).await {
        Ok(report) => {
            for name in &report.played {
                presenter.debug(&format!("caught up: {}", name));
            }
            for name in &report.missing {
                presenter.warn(&format!("{} missing; catch-up chime skipped", name));
            }
            EXIT_SUCCESS
        }
        Err(e) => {
            presenter.warn(&format!("Catch-up skipped: {}", e));
            EXIT_SUCCESS
        }
    }
}

/// Pause announcements for a duration or until an absolute time.
pub async fn run_pause(
    minutes: Option<i64>,
    until: Option<String>,
    presenter: &Presenter,
) -> u8 {
    let now = now_local();
    let spec = match (minutes, until) {
        (Some(n), None) => PauseSpec::For(Duration::minutes(n)),
        (None, Some(expr)) => match parse_pause_until(&expr, now) {
            Ok(at) => PauseSpec::Until(at),
            Err(e) => {
                presenter.error(&e.to_string());
                return EXIT_USAGE_ERROR;
            }
        },
        _ => {
            presenter.error("Specify either --minutes or --until");
            return EXIT_USAGE_ERROR;
        }
    };

    let suppression = SuppressionManager::new(JsonStateStore::new());
    match suppression.set_pause(now, spec).await {
        Ok(expiry) => {
            let fmt = format_description!("[year]-[month]-[day] [hour]:[minute]");
            let shown = expiry
                .format(&fmt)
                .unwrap_or_else(|_| expiry.to_string());
            presenter.success(&format!("🔕 Chimes paused until {}", shown));
            EXIT_SUCCESS
        }
        Err(crate::application::PauseError::NonPositive(e)) => {
            presenter.error(&e.to_string());
            EXIT_USAGE_ERROR
        }
        Err(e) => {
            presenter.error(&e.to_string());
            EXIT_ERROR
        }
    }
}

/// Clear any pause; fine when none is set.
pub async fn run_resume(presenter: &Presenter) -> u8 {
    let suppression = SuppressionManager::new(JsonStateStore::new());
    match suppression.clear_pause().await {
        Ok(true) => {
            presenter.success("🔔 Chimes resumed.");
            EXIT_SUCCESS
        }
        Ok(false) => {
            presenter.info("Chimes were not paused.");
            EXIT_SUCCESS
        }
        Err(e) => {
            presenter.error(&e.to_string());
            EXIT_ERROR
        }
    }
}

/// Show schedule, suppression, and install status.
pub async fn run_status(presenter: &Presenter) -> u8 {
    let now = now_local();
    let config_store = XdgConfigStore::new();
    let config = load_effective_config(presenter).await;

    presenter.key_value("Label", LAUNCHD_LABEL);
    presenter.key_value("Data dir", &paths::data_dir().display().to_string());
    presenter.key_value(
        "Config",
        &if config_store.exists() {
            config_store.path().display().to_string()
        } else {
            "(not found)".to_string()
        },
    );
    presenter.key_value("Player", config.player_or_default());

    match agent_plist_path(None) {
        Ok(plist) => {
            let marker = if plist.exists() { "present" } else { "not installed" };
            presenter.key_value("Agent", &format!("{} ({})", plist.display(), marker));
        }
        Err(e) => presenter.warn(&e.to_string()),
    }

    let upcoming = next_tick(now);
    let selection =
        crate::domain::chime::resolve(upcoming.hour(), upcoming.minute());
    let fmt = format_description!("[hour]:[minute]");
    let shown = upcoming.format(&fmt).unwrap_or_else(|_| upcoming.to_string());
    presenter.key_value("Next chime", &format!("{} ({})", shown, selection));

    let suppression = SuppressionManager::new(JsonStateStore::new());
    match suppression.is_suppressed(now).await {
        Ok(Some(until)) => {
            let remaining = (until - now).whole_minutes();
            presenter.key_value("Silence", &format!("~{} min remaining", remaining));
        }
        Ok(None) => presenter.key_value("Silence", "off"),
        Err(e) => {
            presenter.error(&e.to_string());
            return EXIT_ERROR;
        }
    }

    EXIT_SUCCESS
}

/// Rebuild the full cluster set.
pub async fn run_build(presenter: &Presenter) -> u8 {
    let config = load_effective_config(presenter).await;
    let encoder = FfmpegEncoder::new();
    if !encoder.available().await {
        presenter.error("ffmpeg is not available");
        return EXIT_ERROR;
    }

    let library = ClusterLibrary::new(paths::data_dir(), encoder, &config);
    match library.rebuild_all().await {
        Ok(()) => {
            presenter.success(&format!(
                "Built chime and quarter audio files in {}",
                library.dir().display()
            ));
            EXIT_SUCCESS
        }
        Err(e) => {
            presenter.error(&e.to_string());
            EXIT_ERROR
        }
    }
}

/// Diagnostics: encoder, player, agent, and asset health.
pub async fn run_doctor(presenter: &Presenter) -> u8 {
    let config = load_effective_config(presenter).await;
    let mut ok = true;

    if FfmpegEncoder::new().available().await {
        presenter.success("ffmpeg available");
    } else {
        presenter.error("ffmpeg not found on PATH");
        ok = false;
    }

    match config.player_or_default() {
        "rodio" => presenter.success("player: in-process (rodio)"),
        "none" => presenter.info("player: disabled"),
        binary => {
            if PathBuf::from(binary).is_file() {
                presenter.success(&format!("player present at {}", binary));
            } else {
                presenter.error(&format!("player missing at {}", binary));
                ok = false;
            }
        }
    }

    match agent_plist_path(None) {
        Ok(plist) if plist.exists() => presenter.success("agent plist present"),
        Ok(plist) => {
            presenter.warn(&format!("agent plist missing (expected {})", plist.display()));
            ok = false;
        }
        Err(e) => {
            presenter.warn(&e.to_string());
            ok = false;
        }
    }

    match scheduler(None) {
        Ok(sched) => match sched.is_loaded().await {
            Ok(true) => presenter.success("agent loaded"),
            Ok(false) => {
                presenter.warn("agent is NOT loaded");
                ok = false;
            }
            Err(e) => {
                presenter.warn(&format!("could not query scheduler: {}", e));
                ok = false;
            }
        },
        Err(e) => {
            presenter.warn(&e.to_string());
            ok = false;
        }
    }

    let library = cluster_library(&config);
    let missing = library.missing().await;
    if missing.is_empty() {
        presenter.success(&format!(
            "all required audio files present in {}",
            library.dir().display()
        ));
    } else {
        presenter.warn(&format!(
            "missing audio files in {}: {}",
            library.dir().display(),
            missing.join(", ")
        ));
        ok = false;
    }

    if ok {
        presenter.success("Hooray! All systems go.");
        EXIT_SUCCESS
    } else {
        presenter.error("One or more checks failed.");
        EXIT_ERROR
    }
}

fn scheduler(plist_path: Option<PathBuf>) -> Result<LaunchdScheduler, crate::application::ports::SchedulerError> {
    LaunchdScheduler::for_current_exe(plist_path)
}

fn agent_plist_path(
    plist_path: Option<PathBuf>,
) -> Result<PathBuf, crate::application::ports::SchedulerError> {
    Ok(scheduler(plist_path)?.job_path())
}

/// Install the launchd agent, running the conflict state machine.
pub async fn run_install(
    plist_path: Option<PathBuf>,
    force: bool,
    presenter: &Presenter,
) -> u8 {
    let sched = match scheduler(plist_path) {
        Ok(sched) => sched,
        Err(e) => {
            presenter.error(&e.to_string());
            return EXIT_ERROR;
        }
    };

    let decide = |_existing: &std::path::Path| {
        if force {
            ConflictChoice::Overwrite
        } else {
            ConflictChoice::Abort
        }
    };

    match crate::application::run_install(&sched, decide).await {
        Ok(InstallOutcome::Installed) => {
            presenter.success(&format!("Installed {}", LAUNCHD_LABEL));
            presenter.key_value("plist", &sched.job_path().display().to_string());
            presenter.key_value(
                "troubleshoot",
                &format!("launchctl print gui/$UID/{}", LAUNCHD_LABEL),
            );
            EXIT_SUCCESS
        }
        Ok(InstallOutcome::Aborted) => {
            presenter.warn(&format!(
                "Agent already installed at {}; re-run with --force to replace it",
                sched.job_path().display()
            ));
            EXIT_ERROR
        }
        Err(e) => {
            presenter.error(&format!("Install failed: {}", e));
            EXIT_ERROR
        }
    }
}

/// Unload and remove the launchd agent.
pub async fn run_uninstall_cmd(plist_path: Option<PathBuf>, presenter: &Presenter) -> u8 {
    let sched = match scheduler(plist_path) {
        Ok(sched) => sched,
        Err(e) => {
            presenter.error(&e.to_string());
            return EXIT_ERROR;
        }
    };

    match run_uninstall(&sched).await {
        Ok(()) => {
            presenter.success(&format!("Uninstalled {}", LAUNCHD_LABEL));
            EXIT_SUCCESS
        }
        Err(e) => {
            presenter.error(&format!("Uninstall failed: {}", e));
            EXIT_ERROR
        }
    }
}
