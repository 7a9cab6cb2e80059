//! Hour-boundary arithmetic for wake catch-up and status display

use time::{Duration, OffsetDateTime, Time};

use super::selection::{dial_hour, SoundSelection};

/// Floor a timestamp to the top of its hour.
fn hour_floor(ts: OffsetDateTime) -> OffsetDateTime {
    let top = Time::from_hms(ts.hour(), 0, 0).unwrap_or(Time::MIDNIGHT);
    ts.replace_time(top)
}

/// Enumerate the hourly chimes owed for the gap between `last_run` and `now`.
///
/// Walks the hour boundaries strictly after `last_run` and strictly before
/// `now`, in order, mapping each through the 12-hour dial. A boundary equal
/// to `last_run` counts as already announced. Empty when `now` precedes the
/// first boundary (including clocks that moved backwards, e.g. a DST fold).
pub fn missed_hour_boundaries(last_run: OffsetDateTime, now: OffsetDateTime) -> Vec<SoundSelection> {
    let mut owed = Vec::new();
    let mut boundary = hour_floor(last_run) + Duration::hours(1);
    while boundary < now {
        owed.push(SoundSelection::Hour(dial_hour(boundary.hour())));
        boundary += Duration::hours(1);
    }
    owed
}

/// The next quarter-hour boundary strictly after `now`.
pub fn next_tick(now: OffsetDateTime) -> OffsetDateTime {
    let quarters_past = now.minute() / 15;
    hour_floor(now) + Duration::minutes(i64::from(quarters_past + 1) * 15)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn gap_of_three_hours_yields_three_chimes() {
        let owed = missed_hour_boundaries(
            datetime!(2024-01-01 12:00:00 UTC),
            datetime!(2024-01-01 15:05:00 UTC),
        );
        // 13:00, 14:00, 15:00 boundaries
        assert_eq!(
            owed,
            vec![
                SoundSelection::Hour(1),
                SoundSelection::Hour(2),
                SoundSelection::Hour(3),
            ]
        );
    }

    #[test]
    fn partial_miss_yields_only_the_next_hour() {
        let owed = missed_hour_boundaries(
            datetime!(2025-05-07 06:37:00 UTC),
            datetime!(2025-05-07 07:05:00 UTC),
        );
        assert_eq!(owed, vec![SoundSelection::Hour(7)]);
    }

    #[test]
    fn boundary_at_last_run_is_already_announced() {
        // Last run exactly on the hour: that hour is not replayed
        let owed = missed_hour_boundaries(
            datetime!(2025-05-07 08:00:00 UTC),
            datetime!(2025-05-07 08:30:00 UTC),
        );
        assert!(owed.is_empty());
    }

    #[test]
    fn boundary_at_now_is_not_yet_owed() {
        // now exactly on a boundary: strictly-before excludes it
        let owed = missed_hour_boundaries(
            datetime!(2025-05-07 08:30:00 UTC),
            datetime!(2025-05-07 09:00:00 UTC),
        );
        assert!(owed.is_empty());
    }

    #[test]
    fn gap_crosses_midnight_with_wraparound() {
        let owed = missed_hour_boundaries(
            datetime!(2025-05-07 22:30:00 UTC),
            datetime!(2025-05-08 01:10:00 UTC),
        );
        assert_eq!(
            owed,
            vec![
                SoundSelection::Hour(11),
                SoundSelection::Hour(12),
                SoundSelection::Hour(1),
            ]
        );
    }

    #[test]
    fn clock_moved_backwards_yields_nothing() {
        let owed = missed_hour_boundaries(
            datetime!(2025-11-01 01:30:00 UTC),
            datetime!(2025-11-01 01:30:00 UTC),
        );
        assert!(owed.is_empty());
    }

    #[test]
    fn next_tick_rounds_up_to_the_quarter() {
        assert_eq!(
            next_tick(datetime!(2025-05-07 10:16:00 UTC)),
            datetime!(2025-05-07 10:30:00 UTC)
        );
        assert_eq!(
            next_tick(datetime!(2025-05-07 10:30:00 UTC)),
            datetime!(2025-05-07 10:45:00 UTC)
        );
        assert_eq!(
            next_tick(datetime!(2025-05-07 23:50:00 UTC)),
            datetime!(2025-05-08 00:00:00 UTC)
        );
    }
}
