//! No-op playback adapter
//!
//! Used when playback is disabled ("player = \"none\"") and in tests.

use std::path::Path;

use async_trait::async_trait;

use crate::application::ports::{ChimePlayer, PlaybackError};

/// Player that accepts every file and plays nothing
pub struct NoopChimePlayer;

impl NoopChimePlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoopChimePlayer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChimePlayer for NoopChimePlayer {
    async fn play(&self, _path: &Path) -> Result<(), PlaybackError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn noop_returns_ok() {
        let player = NoopChimePlayer::new();
        assert!(player.play(Path::new("/anything.wav")).await.is_ok());
    }
}
