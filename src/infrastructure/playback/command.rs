//! External-process playback adapter
//!
//! Runs a fixed player binary (e.g. /usr/bin/afplay) with the file path as
//! its only argument and waits for it to exit.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{ChimePlayer, PlaybackError};

/// Playback via an external player process
pub struct CommandChimePlayer {
    binary: PathBuf,
}

impl CommandChimePlayer {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

#[async_trait]
impl ChimePlayer for CommandChimePlayer {
    async fn play(&self, path: &Path) -> Result<(), PlaybackError> {
        if !path.is_file() {
            return Err(PlaybackError::FileNotFound(path.display().to_string()));
        }

        let status = Command::new(&self.binary)
            .arg(path)
            .status()
            .await
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    PlaybackError::DeviceNotAvailable(format!(
                        "player not found at {}",
                        self.binary.display()
                    ))
                } else {
                    PlaybackError::PlaybackFailed(e.to_string())
                }
            })?;

        if !status.success() {
            return Err(PlaybackError::PlaybackFailed(format!(
                "player exited with {}",
                status
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn missing_file_short_circuits() {
        let player = CommandChimePlayer::new("/bin/true");
        let err = player
            .play(Path::new("/nonexistent/quarter_1.wav"))
            .await
            .unwrap_err();
        assert!(matches!(err, PlaybackError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn missing_player_binary_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let wav = dir.path().join("quarter_1.wav");
        std::fs::File::create(&wav)
            .unwrap()
            .write_all(b"RIFF")
            .unwrap();

        let player = CommandChimePlayer::new("/nonexistent/afplay");
        let err = player.play(&wav).await.unwrap_err();
        assert!(matches!(err, PlaybackError::DeviceNotAvailable(_)));
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn nonzero_exit_is_a_playback_failure() {
        let dir = tempfile::tempdir().unwrap();
        let wav = dir.path().join("quarter_1.wav");
        std::fs::write(&wav, b"RIFF").unwrap();

        let player = CommandChimePlayer::new("/bin/false");
        let err = player.play(&wav).await.unwrap_err();
        assert!(matches!(err, PlaybackError::PlaybackFailed(_)));
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn successful_player_run_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let wav = dir.path().join("quarter_1.wav");
        std::fs::write(&wav, b"RIFF").unwrap();

        let player = CommandChimePlayer::new("/bin/true");
        player.play(&wav).await.unwrap();
    }
}
