//! Cluster asset port
//!
//! The orchestrator only needs name-to-path resolution, an existence check,
//! and a way to trigger a full rebuild when a file has gone missing.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::chime::required_assets;

/// Errors from the asset builder
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("ffmpeg not found on PATH; install it to build chime audio")]
    EncoderMissing,

    #[error("Asset build failed: {0}")]
    BuildFailed(String),
}

/// Port trait for the flat directory of prebuilt cluster files
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Absolute path a cluster name resolves to.
    fn path_of(&self, name: &str) -> PathBuf;

    async fn exists(&self, name: &str) -> bool;

    /// Rebuild the complete numbered set of cluster files.
    async fn rebuild_all(&self) -> Result<(), AssetError>;

    /// Required cluster files not currently on disk.
    async fn missing(&self) -> Vec<String> {
        let mut gone = Vec::new();
        for name in required_assets() {
            if !self.exists(&name).await {
                gone.push(name);
            }
        }
        gone
    }
}
