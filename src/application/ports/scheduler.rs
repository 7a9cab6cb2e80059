//! OS scheduler port
//!
//! The background job is triggered by an OS-level periodic scheduler
//! (launchd on macOS). The install use case drives these fine-grained
//! operations through its conflict state machine.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from scheduler control operations
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// The job definition already exists and overwrite was not requested
    #[error("Scheduler job already exists at: {0}")]
    AlreadyExists(String),

    #[error("Scheduler I/O failed: {0}")]
    Io(String),

    #[error("Scheduler command failed: {0}")]
    CommandFailed(String),

    #[error("No scheduler support on this platform: {0}")]
    Unsupported(String),
}

/// Port trait for installing and controlling the periodic trigger
#[async_trait]
pub trait SchedulerCtl: Send + Sync {
    /// Where the job definition (e.g. a launchd plist) lives.
    fn job_path(&self) -> PathBuf;

    /// Write the job definition. Refuses with [`SchedulerError::AlreadyExists`]
    /// when a definition is present and `overwrite` is false.
    async fn write_job(&self, overwrite: bool) -> Result<(), SchedulerError>;

    /// Remove the job definition file; fine if it is already gone.
    async fn remove_job(&self) -> Result<(), SchedulerError>;

    /// Register the job with the scheduler.
    async fn load(&self) -> Result<(), SchedulerError>;

    /// Deregister the job; fine if it was not loaded.
    async fn unload(&self) -> Result<(), SchedulerError>;

    /// Whether the scheduler currently knows about the job.
    async fn is_loaded(&self) -> Result<bool, SchedulerError>;
}
