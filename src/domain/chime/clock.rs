//! Clock reading value object

use time::OffsetDateTime;

/// An immutable local wall-clock reading at the moment a decision is
/// requested. Derived fresh each tick, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    hour: u8,
    minute: u8,
}

impl ClockReading {
    /// Create a reading, clamping out-of-range components.
    ///
    /// Scheduling is a local-time concept; callers should construct this
    /// from [`OffsetDateTime`] in the local offset, not UTC.
    pub fn new(hour: u8, minute: u8) -> Self {
        Self {
            hour: hour.min(23),
            minute: minute.min(59),
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl From<OffsetDateTime> for ClockReading {
    fn from(dt: OffsetDateTime) -> Self {
        Self::new(dt.hour(), dt.minute())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn reading_from_datetime() {
        let reading = ClockReading::from(datetime!(2025-05-07 10:16:42 UTC));
        assert_eq!(reading.hour(), 10);
        assert_eq!(reading.minute(), 16);
    }

    #[test]
    fn out_of_range_components_are_clamped() {
        let reading = ClockReading::new(99, 99);
        assert_eq!(reading.hour(), 23);
        assert_eq!(reading.minute(), 59);
    }
}
