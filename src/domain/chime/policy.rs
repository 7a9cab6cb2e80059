//! Pluggable sound-selection policies
//!
//! One-method trait replacing duck-typed policy objects: the caller picks a
//! concrete policy explicitly, the orchestrator only sees the trait.

use super::clock::ClockReading;
use super::selection::{resolve, resolve_nearest, SoundSelection};

/// Maps a clock reading to a sound selection.
pub trait ChimePolicy: Send + Sync {
    fn select(&self, reading: ClockReading) -> SoundSelection;
}

/// Exact-minute policy for scheduler-driven ticks: only :00/:15/:30/:45
/// produce sound, everything else is silent.
pub struct ExactTickPolicy;

impl ChimePolicy for ExactTickPolicy {
    fn select(&self, reading: ClockReading) -> SoundSelection {
        resolve(reading.hour(), reading.minute())
    }
}

/// Nearest-quarter policy for manual "chime right now" invocations: the
/// minute is rounded to the closest quarter, so nothing is ever silent.
pub struct NearestQuarterPolicy;

impl ChimePolicy for NearestQuarterPolicy {
    fn select(&self, reading: ClockReading) -> SoundSelection {
        resolve_nearest(reading.hour(), reading.minute())
    }
}
