//! Thin wrapper around the ffmpeg binary
//!
//! Keeps subprocess handling in one place and makes the binary injectable
//! for tests. All synthesis goes through lavfi sources; concatenation uses
//! the concat demuxer with a temp list file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::fs;
use tokio::process::Command;

use crate::application::ports::AssetError;

/// ffmpeg subprocess runner
pub struct FfmpegEncoder {
    binary: PathBuf,
}

impl FfmpegEncoder {
    /// Use `ffmpeg` from PATH.
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("ffmpeg"),
        }
    }

    /// Use an explicit binary (tests, odd installs).
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Whether the binary can be executed at all.
    pub async fn available(&self) -> bool {
        Command::new(&self.binary)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }

    async fn run(&self, args: &[String]) -> Result<(), AssetError> {
        let status = Command::new(&self.binary)
            .args(args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    AssetError::EncoderMissing
                } else {
                    AssetError::BuildFailed(e.to_string())
                }
            })?;

        if !status.success() {
            return Err(AssetError::BuildFailed(format!(
                "ffmpeg exited with {}",
                status
            )));
        }
        Ok(())
    }

    /// Generate a silent WAV of `millis` milliseconds.
    pub async fn make_silence(&self, output: &Path, millis: u64) -> Result<(), AssetError> {
        let args = vec![
            "-y".to_string(),
            "-f".to_string(),
            "lavfi".to_string(),
            "-i".to_string(),
            "anullsrc=r=44100:cl=stereo".to_string(),
            "-t".to_string(),
            format!("{:.3}", millis as f64 / 1000.0),
            output.to_string_lossy().to_string(),
        ];
        self.run(&args).await
    }

    /// Synthesize a short sine tone with a fade-out, for default clips.
    pub async fn make_tone(
        &self,
        output: &Path,
        freq_hz: u32,
        millis: u64,
    ) -> Result<(), AssetError> {
        let secs = millis as f64 / 1000.0;
        let args = vec![
            "-y".to_string(),
            "-f".to_string(),
            "lavfi".to_string(),
            "-i".to_string(),
            format!("sine=frequency={}:duration={:.3}", freq_hz, secs),
            "-af".to_string(),
            format!("afade=t=out:st={:.3}:d={:.3}", secs * 0.6, secs * 0.4),
            output.to_string_lossy().to_string(),
        ];
        self.run(&args).await
    }

    /// Concatenate `inputs` into `output` without re-encoding.
    pub async fn concat(&self, inputs: &[PathBuf], output: &Path) -> Result<(), AssetError> {
        let list_path = output.with_extension("list.txt");

        let mut listing = String::new();
        for input in inputs {
            listing.push_str(&format!("file '{}'\n", input.display()));
        }
        fs::write(&list_path, listing)
            .await
            .map_err(|e| AssetError::BuildFailed(e.to_string()))?;

        let args = vec![
            "-y".to_string(),
            "-f".to_string(),
            "concat".to_string(),
            "-safe".to_string(),
            "0".to_string(),
            "-i".to_string(),
            list_path.to_string_lossy().to_string(),
            "-c".to_string(),
            "copy".to_string(),
            output.to_string_lossy().to_string(),
        ];
        let result = self.run(&args).await;

        // Best-effort cleanup of the temp list
        let _ = fs::remove_file(&list_path).await;
        result
    }
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self::new()
    }
}
