//! Infrastructure layer - Adapter implementations
//!
//! Concrete implementations of the application ports: JSON state file,
//! rodio / external-process playback, ffmpeg asset builder, launchd
//! scheduler, and the XDG config store.

pub mod assets;
pub mod config;
pub mod paths;
pub mod playback;
pub mod scheduler;
pub mod state;

// Re-export adapters
pub use assets::{ClusterLibrary, FfmpegEncoder};
pub use config::XdgConfigStore;
pub use playback::{create_player, CommandChimePlayer, NoopChimePlayer, RodioChimePlayer};
pub use scheduler::{LaunchdScheduler, LAUNCHD_LABEL};
pub use state::JsonStateStore;
