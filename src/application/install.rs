//! Scheduler install/uninstall use case
//!
//! Installation runs as an explicit finite state machine instead of nested
//! error handlers: a pre-existing job definition is a Conflict, and an
//! injected decision function chooses between overwriting and aborting.

use std::path::Path;

use super::ports::{SchedulerCtl, SchedulerError};

/// States of the install flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallState {
    Attempting,
    Conflict,
    Retrying,
    Done,
    Aborted,
}

/// What to do when the job definition already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictChoice {
    Overwrite,
    Abort,
}

/// Terminal result of the install flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    Aborted,
}

/// Drive the install state machine to a terminal state.
///
/// `decide` is consulted at most once, in the Conflict state, with the path
/// of the existing job definition.
pub async fn run_install<F>(
    ctl: &dyn SchedulerCtl,
    decide: F,
) -> Result<InstallOutcome, SchedulerError>
where
    F: Fn(&Path) -> ConflictChoice,
{
    let mut state = InstallState::Attempting;
    loop {
        state = match state {
            InstallState::Attempting => match ctl.write_job(false).await {
                Ok(()) => {
                    ctl.load().await?;
                    InstallState::Done
                }
                Err(SchedulerError::AlreadyExists(_)) => InstallState::Conflict,
                Err(e) => return Err(e),
            },
            InstallState::Conflict => match decide(&ctl.job_path()) {
                ConflictChoice::Overwrite => InstallState::Retrying,
                ConflictChoice::Abort => InstallState::Aborted,
            },
            InstallState::Retrying => {
                // The stale job may still be loaded under the same label
                ctl.unload().await?;
                ctl.write_job(true).await?;
                ctl.load().await?;
                InstallState::Done
            }
            InstallState::Done => return Ok(InstallOutcome::Installed),
            InstallState::Aborted => return Ok(InstallOutcome::Aborted),
        };
    }
}

/// Unload the job and remove its definition.
pub async fn run_uninstall(ctl: &dyn SchedulerCtl) -> Result<(), SchedulerError> {
    ctl.unload().await?;
    ctl.remove_job().await
}
