//! OS scheduler adapters

mod launchd;

pub use launchd::{LaunchdScheduler, LAUNCHD_LABEL};
