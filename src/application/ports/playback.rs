//! Audio playback port
//!
//! A chime is meant to be heard in full, so playback is awaited to
//! completion; the adapter decides how the file actually gets played.

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during cluster playback
#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("Audio file not found: {0}")]
    FileNotFound(String),

    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    #[error("Audio device not available: {0}")]
    DeviceNotAvailable(String),
}

/// Port trait for playing a cluster file to completion
#[async_trait]
pub trait ChimePlayer: Send + Sync {
    async fn play(&self, path: &Path) -> Result<(), PlaybackError>;
}
