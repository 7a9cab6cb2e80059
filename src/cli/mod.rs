//! CLI layer

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;

pub use app::{EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction};
pub use presenter::Presenter;
