//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod asset_store;
pub mod config;
pub mod playback;
pub mod scheduler;
pub mod state_store;

// Re-export common types
pub use asset_store::{AssetError, AssetStore};
pub use config::ConfigStore;
pub use playback::{ChimePlayer, PlaybackError};
pub use scheduler::{SchedulerCtl, SchedulerError};
pub use state_store::{StateError, StateStore};
