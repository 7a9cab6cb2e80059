//! Configuration store port

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port trait for loading and saving configuration
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load config, returning an empty config when no file exists.
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Save config, creating parent directories as needed.
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Path to the config file.
    fn path(&self) -> PathBuf;

    /// Whether the config file exists.
    fn exists(&self) -> bool;

    /// Create the config file with defaults; errors if it already exists.
    async fn init(&self) -> Result<(), ConfigError>;
}
