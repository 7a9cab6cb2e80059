//! Sound selection value object and the resolver proper

use std::fmt;

/// Minute marks that trigger a quarter cluster
const QUARTER_1: u8 = 15;
const QUARTER_2: u8 = 30;
const QUARTER_3: u8 = 45;

/// The resolver's output: which audio cluster encodes a given moment.
///
/// Exactly one variant holds for any (hour, minute) pair; the mapping is
/// total and deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundSelection {
    /// n pops for n quarters past the hour, n in 1..=3
    Quarter(u8),
    /// Chime then h pops for the completed hour on a 12-hour dial, h in 1..=12
    Hour(u8),
    /// No sound maps to this minute
    Silent,
}

impl SoundSelection {
    /// File name of the prebuilt cluster for this selection, if any.
    ///
    /// This is the naming contract shared with the asset builder: clusters
    /// live in a single flat directory as `quarter_{n}.wav` / `hour_{h}.wav`.
    pub fn asset_name(&self) -> Option<String> {
        match self {
            Self::Quarter(n) => Some(format!("quarter_{}.wav", n)),
            Self::Hour(h) => Some(format!("hour_{}.wav", h)),
            Self::Silent => None,
        }
    }

    pub fn is_silent(&self) -> bool {
        matches!(self, Self::Silent)
    }
}

impl fmt::Display for SoundSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quarter(n) => write!(f, "quarter past x{}", n),
            Self::Hour(h) => write!(f, "hour x{}", h),
            Self::Silent => write!(f, "silent"),
        }
    }
}

/// Project a 24-hour clock hour onto the 12-hour dial, substituting 12 for 0.
pub(crate) fn dial_hour(hour_24: u8) -> u8 {
    match hour_24 % 12 {
        0 => 12,
        h => h,
    }
}

/// Map an exact (hour, minute) reading to its sound selection.
///
/// At minute 0 the hour just *completed* is announced: 0:00 and 12:00 both
/// map to `Hour(12)`, 13:00 maps to `Hour(1)`. Minutes 15/30/45 map to the
/// quarter clusters; every other minute is silent.
pub fn resolve(hour: u8, minute: u8) -> SoundSelection {
    match minute {
        0 => SoundSelection::Hour(dial_hour(hour)),
        QUARTER_1 => SoundSelection::Quarter(1),
        QUARTER_2 => SoundSelection::Quarter(2),
        QUARTER_3 => SoundSelection::Quarter(3),
        _ => SoundSelection::Silent,
    }
}

/// Round a minute to its nearest quarter index (0..=3), wrapping 60 to 0.
pub fn nearest_quarter_index(minute: u8) -> u8 {
    ((f64::from(minute) / 15.0).round() as u8) % 4
}

/// Resolve the chime closest to an arbitrary reading.
///
/// Unlike [`resolve`], this never returns `Silent`: the minute is rounded to
/// the nearest quarter first. Agrees with [`resolve`] at the four exact
/// quarter values.
pub fn resolve_nearest(hour: u8, minute: u8) -> SoundSelection {
    match nearest_quarter_index(minute) {
        0 => {
            // Rounding down to :00 announces this hour; rounding up past
            // :52 announces the hour about to complete.
            let h = if minute > 45 { hour + 1 } else { hour };
            SoundSelection::Hour(dial_hour(h % 24))
        }
        n => SoundSelection::Quarter(n),
    }
}

/// Every cluster file the builder must produce and diagnostics must find.
pub fn required_assets() -> Vec<String> {
    let mut names: Vec<String> = (1..=12).map(|h| format!("hour_{}.wav", h)).collect();
    names.extend((1..=3).map(|n| format!("quarter_{}.wav", n)));
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_is_total() {
        for hour in 0..24u8 {
            for minute in 0..60u8 {
                // Must not panic, and must land in exactly one variant
                match resolve(hour, minute) {
                    SoundSelection::Quarter(n) => assert!((1..=3).contains(&n)),
                    SoundSelection::Hour(h) => assert!((1..=12).contains(&h)),
                    SoundSelection::Silent => {}
                }
            }
        }
    }

    #[test]
    fn hour_wraparound_law() {
        assert_eq!(resolve(0, 0), SoundSelection::Hour(12));
        assert_eq!(resolve(12, 0), SoundSelection::Hour(12));
        assert_eq!(resolve(13, 0), SoundSelection::Hour(1));
        assert_eq!(resolve(23, 0), SoundSelection::Hour(11));
        for hour in 0..24u8 {
            let expected = if hour % 12 == 0 { 12 } else { hour % 12 };
            assert_eq!(resolve(hour, 0), SoundSelection::Hour(expected));
        }
    }

    #[test]
    fn quarter_mapping_law() {
        for hour in 0..24u8 {
            assert_eq!(resolve(hour, 15), SoundSelection::Quarter(1));
            assert_eq!(resolve(hour, 30), SoundSelection::Quarter(2));
            assert_eq!(resolve(hour, 45), SoundSelection::Quarter(3));
        }
    }

    #[test]
    fn silence_law() {
        for hour in 0..24u8 {
            for minute in 0..60u8 {
                if !matches!(minute, 0 | 15 | 30 | 45) {
                    assert_eq!(resolve(hour, minute), SoundSelection::Silent);
                }
            }
        }
    }

    #[test]
    fn nearest_quarter_rounds_and_wraps() {
        assert_eq!(nearest_quarter_index(0), 0);
        assert_eq!(nearest_quarter_index(7), 0);
        assert_eq!(nearest_quarter_index(8), 1);
        assert_eq!(nearest_quarter_index(16), 1);
        assert_eq!(nearest_quarter_index(22), 1);
        assert_eq!(nearest_quarter_index(23), 2);
        assert_eq!(nearest_quarter_index(37), 2);
        assert_eq!(nearest_quarter_index(38), 3);
        assert_eq!(nearest_quarter_index(52), 3);
        // 53..59 round to 60, which wraps to index 0
        assert_eq!(nearest_quarter_index(53), 0);
        assert_eq!(nearest_quarter_index(59), 0);
    }

    #[test]
    fn nearest_agrees_with_exact_at_quarter_marks() {
        for hour in 0..24u8 {
            for minute in [0u8, 15, 30, 45] {
                assert_eq!(resolve_nearest(hour, minute), resolve(hour, minute));
            }
        }
    }

    #[test]
    fn nearest_rounds_up_across_the_hour() {
        // 10:16 is closest to quarter past
        assert_eq!(resolve_nearest(10, 16), SoundSelection::Quarter(1));
        // 14:58 is closest to 15:00, which announces hour 3
        assert_eq!(resolve_nearest(14, 58), SoundSelection::Hour(3));
        // 23:58 wraps to 0:00, the 12-pop cluster
        assert_eq!(resolve_nearest(23, 58), SoundSelection::Hour(12));
    }

    #[test]
    fn asset_names_follow_contract() {
        assert_eq!(
            SoundSelection::Quarter(2).asset_name().as_deref(),
            Some("quarter_2.wav")
        );
        assert_eq!(
            SoundSelection::Hour(12).asset_name().as_deref(),
            Some("hour_12.wav")
        );
        assert_eq!(SoundSelection::Silent.asset_name(), None);
    }

    #[test]
    fn required_assets_cover_all_clusters() {
        let names = required_assets();
        assert_eq!(names.len(), 15);
        assert!(names.contains(&"hour_1.wav".to_string()));
        assert!(names.contains(&"hour_12.wav".to_string()));
        assert!(names.contains(&"quarter_3.wav".to_string()));
    }
}
