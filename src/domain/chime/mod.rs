//! Time-to-sound resolution
//!
//! Pure mapping from wall-clock readings to the audio cluster that encodes
//! them, plus the hour-boundary arithmetic used by wake catch-up.

pub mod clock;
pub mod policy;
pub mod schedule;
pub mod selection;

pub use clock::ClockReading;
pub use policy::{ChimePolicy, ExactTickPolicy, NearestQuarterPolicy};
pub use schedule::{missed_hour_boundaries, next_tick};
pub use selection::{
    nearest_quarter_index, required_assets, resolve, resolve_nearest, SoundSelection,
};
