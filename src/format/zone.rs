use std::fmt::Display;

use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDateTime, TimeDelta, TimeZone, Utc};

/// Time zone a date is rendered in, and in which offset-less date-times
/// are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    Utc,
    Fixed(FixedOffset),
    /// The process zone, as chrono sees it (honours `TZ`).
    #[default]
    Local,
}

impl Zone {
    /// Fixed offset east of UTC in seconds. `None` if out of range.
    pub fn east(seconds: i32) -> Option<Self> {
        FixedOffset::east_opt(seconds).map(Zone::Fixed)
    }

    pub(crate) fn render(&self, instant: &DateTime<Utc>, pattern: &str) -> String {
        match self {
            Zone::Utc => render_in(instant, pattern),
            Zone::Fixed(offset) => render_in(&instant.with_timezone(offset), pattern),
            Zone::Local => render_in(&instant.with_timezone(&Local), pattern),
        }
    }

    /// Interpret a wall-clock time in this zone. See [`wall_clock_to_utc`].
    pub(crate) fn from_local(&self, naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Zone::Utc => Some(Utc.from_utc_datetime(naive)),
            Zone::Fixed(offset) => wall_clock_to_utc(offset, naive),
            Zone::Local => wall_clock_to_utc(&Local, naive),
        }
    }
}

/// The instant a wall-clock time denotes in `tz`.
///
/// Ambiguous times (clocks turned back) take the earlier instant. Times
/// inside a gap (clocks turned forward) are shifted forward by an hour.
pub fn wall_clock_to_utc<Tz: TimeZone>(tz: &Tz, naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(naive)
        .earliest()
        .or_else(|| {
            let shifted = naive.checked_add_signed(TimeDelta::hours(1))?;
            tz.from_local_datetime(&shifted).earliest()
        })
        .map(|dt| dt.with_timezone(&Utc))
}

// chrono's %Y signs and pads years outside 0..=9999 (`+10000`, `-0001`).
// Years are written as plain integers instead: `10000`, `-1`.
fn render_in<Tz>(dt: &DateTime<Tz>, pattern: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let pattern = pattern.replace("%Y", &dt.year().to_string());
    dt.format(&pattern).to_string()
}
