//! Well-known directories, with env overrides for tests and odd setups

use std::env;
use std::path::PathBuf;

pub const APP_NAME: &str = "popclock";

/// Env var overriding the data directory (state file, cluster audio)
pub const DATA_DIR_ENV: &str = "POPCLOCK_DATA_DIR";

/// Env var overriding the config directory
pub const CONFIG_DIR_ENV: &str = "POPCLOCK_CONFIG_DIR";

/// Directory holding the state file and the built cluster files.
pub fn data_dir() -> PathBuf {
    if let Some(dir) = env::var_os(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join(APP_NAME)
}

/// Directory holding config.toml.
pub fn config_dir() -> PathBuf {
    if let Some(dir) = env::var_os(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join(APP_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dirs_end_with_app_name() {
        // Only meaningful when the overrides are unset, as in CI
        if env::var_os(DATA_DIR_ENV).is_none() {
            assert!(data_dir().to_string_lossy().contains(APP_NAME));
        }
        if env::var_os(CONFIG_DIR_ENV).is_none() {
            assert!(config_dir().to_string_lossy().contains(APP_NAME));
        }
    }
}
