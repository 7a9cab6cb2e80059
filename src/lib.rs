//! popclock - quarter-hour time chimes with pop-encoded hours
//!
//! An external scheduler runs `popclock tick` at :00/:15/:30/:45. The tick
//! maps the local wall-clock to a prebuilt audio cluster (a chime followed by
//! n pops for the completed hour, or a shorter pop cluster for the quarter),
//! honoring a persisted pause window and optional quiet hours.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: time-to-sound resolution, suppression record, config values
//! - **Application**: tick/wake/install use cases and port interfaces (traits)
//! - **Infrastructure**: adapter implementations (rodio, ffmpeg, launchd, JSON state)
//! - **CLI**: command-line interface, argument parsing, and output formatting

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
