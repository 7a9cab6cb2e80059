//! Flat-directory cluster library
//!
//! Owns the directory of built cluster files and knows how to rebuild the
//! complete set from the three primitive clips. Custom chime/pop clips come
//! from config; absent that, primitives are synthesized with ffmpeg.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::{AssetError, AssetStore};
use crate::domain::config::AppConfig;

use super::ffmpeg::FfmpegEncoder;

const SILENCE_FILE: &str = "silence.wav";
const CHIME_FILE: &str = "chime.wav";
const POP_FILE: &str = "pop.wav";

/// Gap between pops within a cluster
const GAP_MILLIS: u64 = 300;

/// Cluster directory plus the builder for it
pub struct ClusterLibrary {
    dir: PathBuf,
    encoder: FfmpegEncoder,
    chime_src: Option<PathBuf>,
    pop_src: Option<PathBuf>,
}

impl ClusterLibrary {
    pub fn new(dir: impl Into<PathBuf>, encoder: FfmpegEncoder, config: &AppConfig) -> Self {
        Self {
            dir: dir.into(),
            encoder,
            chime_src: config.chime_wav.as_ref().map(PathBuf::from),
            pop_src: config.pop_wav.as_ref().map(PathBuf::from),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolve the primitive clips, synthesizing defaults where no custom
    /// clip is configured.
    async fn ensure_primitives(&self) -> Result<(PathBuf, PathBuf, PathBuf), AssetError> {
        let silence = self.dir.join(SILENCE_FILE);
        self.encoder.make_silence(&silence, GAP_MILLIS).await?;

        let chime = match &self.chime_src {
            Some(path) => path.clone(),
            None => {
                let path = self.dir.join(CHIME_FILE);
                self.encoder.make_tone(&path, 660, 900).await?;
                path
            }
        };

        let pop = match &self.pop_src {
            Some(path) => path.clone(),
            None => {
                let path = self.dir.join(POP_FILE);
                self.encoder.make_tone(&path, 880, 120).await?;
                path
            }
        };

        Ok((chime, pop, silence))
    }
}

/// Input sequence for a quarter cluster: n pops with gaps between.
fn quarter_inputs(pop: &Path, silence: &Path, n: u8) -> Vec<PathBuf> {
    let mut inputs = Vec::new();
    for i in 0..n {
        if i > 0 {
            inputs.push(silence.to_path_buf());
        }
        inputs.push(pop.to_path_buf());
    }
    inputs
}

/// Input sequence for an hour cluster: chime, gap, then h pops with gaps.
fn hour_inputs(chime: &Path, pop: &Path, silence: &Path, h: u8) -> Vec<PathBuf> {
    let mut inputs = vec![chime.to_path_buf()];
    for _ in 0..h {
        inputs.push(silence.to_path_buf());
        inputs.push(pop.to_path_buf());
    }
    inputs
}

#[async_trait]
impl AssetStore for ClusterLibrary {
    fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    async fn exists(&self, name: &str) -> bool {
        fs::metadata(self.path_of(name)).await.is_ok()
    }

    async fn rebuild_all(&self) -> Result<(), AssetError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AssetError::BuildFailed(e.to_string()))?;

        let (chime, pop, silence) = self.ensure_primitives().await?;

        for n in 1..=3u8 {
            let output = self.path_of(&format!("quarter_{}.wav", n));
            self.encoder
                .concat(&quarter_inputs(&pop, &silence, n), &output)
                .await?;
        }
        for h in 1..=12u8 {
            let output = self.path_of(&format!("hour_{}.wav", h));
            self.encoder
                .concat(&hour_inputs(&chime, &pop, &silence, h), &output)
                .await?;
        }
        Ok(())
    }
}
