//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// popclock - gentle quarter-hour time chimes
#[derive(Parser, Debug)]
#[command(name = "popclock")]
#[command(version)]
#[command(about = "Quarter-hour time chimes with pop-encoded hours")]
#[command(long_about = None)]
pub struct Cli {
    /// Enable verbose debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate one scheduler tick (launchd calls this at :00/:15/:30/:45)
    Tick,
    /// Play the hourly chimes missed while the machine was asleep
    Wake,
    /// Play the chime nearest to the current time
    Play,
    /// Temporarily pause all chimes
    Pause {
        /// Minutes to pause for
        #[arg(long, value_name = "N", conflicts_with = "until")]
        minutes: Option<i64>,
        /// Pause until HH:MM (24h); times already past mean tomorrow
        #[arg(long, value_name = "HH:MM")]
        until: Option<String>,
    },
    /// Resume chimes
    Resume,
    /// Show schedule, suppression, and install status
    Status,
    /// Rebuild the cluster audio files
    Build,
    /// Run diagnostics to verify setup and health
    Doctor,
    /// Install the background chime agent
    Install {
        /// Optional explicit plist path
        #[arg(long, value_name = "PATH")]
        plist_path: Option<PathBuf>,
        /// Overwrite an existing agent without asking
        #[arg(long)]
        force: bool,
    },
    /// Unload and remove the background chime agent
    Uninstall {
        /// Explicit plist path if you used one at install
        #[arg(long, value_name = "PATH")]
        plist_path: Option<PathBuf>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["chime_wav", "pop_wav", "player", "quiet_hours"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
