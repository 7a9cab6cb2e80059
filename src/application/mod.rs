//! Application layer - Use cases and port interfaces
//!
//! Contains the core operations and trait definitions
//! for external system interactions.

pub mod install;
pub mod ports;
pub mod suppression;
pub mod tick;

// Re-export use cases
pub use install::{run_install, run_uninstall, ConflictChoice, InstallOutcome, InstallState};
pub use suppression::{PauseError, PauseSpec, SuppressionManager};
pub use tick::{ChimeOrchestrator, TickError, TickOutcome, WakeReport};
