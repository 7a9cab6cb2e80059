//! Rodio-based playback adapter
//!
//! Decodes and plays a cluster file in-process, blocking until the sound
//! has finished.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rodio::{Decoder, OutputStream, Sink};

use crate::application::ports::{ChimePlayer, PlaybackError};

/// Playback implementation using rodio
pub struct RodioChimePlayer;

impl RodioChimePlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RodioChimePlayer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChimePlayer for RodioChimePlayer {
    async fn play(&self, path: &Path) -> Result<(), PlaybackError> {
        let path = path.to_path_buf();
        // Playback blocks until the sink drains; keep it off the async runtime
        tokio::task::spawn_blocking(move || play_file_sync(&path))
            .await
            .map_err(|e| PlaybackError::PlaybackFailed(format!("Task join error: {}", e)))?
    }
}

/// Play a file synchronously (called from spawn_blocking)
fn play_file_sync(path: &PathBuf) -> Result<(), PlaybackError> {
    if !path.is_file() {
        return Err(PlaybackError::FileNotFound(path.display().to_string()));
    }

    let (_stream, stream_handle) = OutputStream::try_default()
        .map_err(|e| PlaybackError::DeviceNotAvailable(e.to_string()))?;
    let sink =
        Sink::try_new(&stream_handle).map_err(|e| PlaybackError::PlaybackFailed(e.to_string()))?;

    let file =
        File::open(path).map_err(|e| PlaybackError::PlaybackFailed(e.to_string()))?;
    let source = Decoder::new(BufReader::new(file))
        .map_err(|e| PlaybackError::PlaybackFailed(e.to_string()))?;

    sink.append(source);
    sink.sleep_until_end();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_is_reported_before_touching_the_device() {
        let player = RodioChimePlayer::new();
        let err = player
            .play(Path::new("/nonexistent/hour_3.wav"))
            .await
            .unwrap_err();
        assert!(matches!(err, PlaybackError::FileNotFound(_)));
    }

    // Note: positive-path tests require audio hardware and are not run in CI
}
