//! Domain layer - Core business logic
//!
//! Contains value objects, the time-to-sound resolver, and domain errors.
//! This layer has no dependencies on external systems.

pub mod chime;
pub mod config;
pub mod error;
pub mod state;

// Re-export common types
pub use chime::{ClockReading, SoundSelection};
pub use config::AppConfig;
pub use error::*;
pub use state::SuppressionRecord;
