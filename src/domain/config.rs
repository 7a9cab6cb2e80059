//! Application configuration value objects

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::Time;

use crate::domain::error::QuietHoursParseError;

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Custom chime clip; the builder synthesizes one when unset
    pub chime_wav: Option<String>,
    /// Custom pop clip; the builder synthesizes one when unset
    pub pop_wav: Option<String>,
    /// "rodio" for in-process playback, or a path to an external player
    /// binary such as /usr/bin/afplay
    pub player: Option<String>,
    /// Span during which ticks are skipped, e.g. "22:00-07:00"
    pub quiet_hours: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            chime_wav: None,
            pop_wav: None,
            player: Some("rodio".to_string()),
            quiet_hours: None,
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            chime_wav: other.chime_wav.or(self.chime_wav),
            pop_wav: other.pop_wav.or(self.pop_wav),
            player: other.player.or(self.player),
            quiet_hours: other.quiet_hours.or(self.quiet_hours),
        }
    }

    pub fn player_or_default(&self) -> &str {
        self.player.as_deref().unwrap_or("rodio")
    }

    /// Parsed quiet hours, or None when unset or malformed. A bad span in
    /// the file must not break ticks, so this is deliberately lenient;
    /// `config set` validates strictly before writing.
    pub fn quiet_hours_or_none(&self) -> Option<QuietHours> {
        self.quiet_hours.as_deref().and_then(|s| s.parse().ok())
    }
}

/// A daily wall-clock span, possibly wrapping midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuietHours {
    start: Time,
    end: Time,
}

impl QuietHours {
    /// Whether `t` falls inside the span. The start is inclusive and the
    /// end exclusive; spans where start > end wrap across midnight.
    pub fn contains(&self, t: Time) -> bool {
        if self.start <= self.end {
            self.start <= t && t < self.end
        } else {
            t >= self.start || t < self.end
        }
    }
}

fn parse_hhmm(s: &str) -> Option<Time> {
    let (h, m) = s.split_once(':')?;
    let hour: u8 = h.parse().ok()?;
    let minute: u8 = m.parse().ok()?;
    Time::from_hms(hour, minute, 0).ok()
}

impl FromStr for QuietHours {
    type Err = QuietHoursParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || QuietHoursParseError {
            input: s.to_string(),
        };
        let (start_s, end_s) = s.split_once('-').ok_or_else(err)?;
        let start = parse_hhmm(start_s.trim()).ok_or_else(err)?;
        let end = parse_hhmm(end_s.trim()).ok_or_else(err)?;
        Ok(Self { start, end })
    }
}
