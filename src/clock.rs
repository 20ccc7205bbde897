//! All things time-related.

use chrono::SecondsFormat;
pub use chrono::{DateTime, TimeDelta, Utc};
use regex::Regex;
use std::ops::Sub;

/// Tells time and returns the time.
///
/// Generally you will want to retrieve time using [`SystemClock`],
/// but in tests you may want to implement a `Clock` with a fixed time.
pub trait Clock {
    /// The current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Interacts with the system clock to get the current time.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Resolves a relative time window into an absolute RFC 3339 timestamp.
///
/// `window` is a compact duration such as `3h` or `7d` (hours or days,
/// case-insensitive); the result is the current time minus that duration.
/// A string that does not match the pattern is returned unchanged, on the
/// assumption that it is already an absolute timestamp the API will accept.
///
/// # Examples
///
/// ```
/// use birdwatch::clock::{SystemClock, window_start};
/// let start = window_start("2d", &SystemClock);
/// assert!(start.ends_with('Z'));
/// assert_eq!(window_start("2025-01-01T00:00:00Z", &SystemClock), "2025-01-01T00:00:00Z");
/// ```
pub fn window_start<C: Clock>(window: &str, clock: &C) -> String {
    let re = Regex::new(r"^(?i)(\d+)([hd])$").expect("window pattern is invalid");
    let Some(caps) = re.captures(window) else {
        return window.to_string();
    };

    let Ok(value) = caps[1].parse::<i64>() else {
        return window.to_string();
    };
    let delta = match caps[2].to_ascii_lowercase().as_str() {
        "h" => TimeDelta::try_hours(value),
        _ => TimeDelta::try_days(value),
    };

    match delta.and_then(|d| clock.now().checked_sub_signed(d)) {
        Some(start) => start.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => window.to_string(),
    }
}

/// Marks a thing that has a notion of its age.
pub trait HasAge {
    /// The date the item was created, in UTC.
    fn created_utc(&self) -> DateTime<Utc>;

    /// The age of the item.
    ///
    /// `clock` is a source of time from which the age can be derived.
    /// Generally [`SystemClock::default()`] is used.
    fn age<C: Clock>(&self, clock: &C) -> TimeDelta {
        clock.now().sub(self.created_utc())
    }

    /// The age of the item as a compact feed-style string: minutes under
    /// an hour ("42m ago"), hours under a day ("7h ago"), days otherwise
    /// ("3d ago").
    fn relative_age<C: Clock>(&self, clock: &C) -> String {
        let secs = self.age(clock).num_seconds();
        if secs < 3_600 {
            format!("{}m ago", secs / 60)
        } else if secs < 86_400 {
            format!("{}h ago", secs / 3_600)
        } else {
            format!("{}d ago", secs / 86_400)
        }
    }
}

#[cfg(test)]
mod tests {
    mod clock {
        use super::super::*;
        use std::ops::Sub;

        #[test]
        fn it_returns_the_system_time() {
            let clock = SystemClock::default();
            let delta = Utc::now().sub(clock.now());
            let secs = delta.num_seconds();
            assert_eq!(secs, 0);
        }
    }

    mod window_start {
        use super::super::*;
        use crate::test_utils::FrozenClock;

        #[test]
        fn it_resolves_hour_windows() {
            let clock = FrozenClock::default();
            assert_eq!(window_start("3h", &clock), "2025-07-01T09:00:00.000Z");
        }

        #[test]
        fn it_resolves_day_windows() {
            let clock = FrozenClock::default();
            assert_eq!(window_start("7d", &clock), "2025-06-24T12:00:00.000Z");
        }

        #[test]
        fn it_ignores_unit_case() {
            let clock = FrozenClock::default();
            assert_eq!(window_start("3H", &clock), "2025-07-01T09:00:00.000Z");
            assert_eq!(window_start("1D", &clock), "2025-06-30T12:00:00.000Z");
        }

        #[test]
        fn it_passes_absolute_timestamps_through() {
            let clock = FrozenClock::default();
            let timestamp = "2025-01-01T00:00:00Z";
            assert_eq!(window_start(timestamp, &clock), timestamp);
        }

        #[test]
        fn it_passes_unrecognized_windows_through() {
            let clock = FrozenClock::default();
            assert_eq!(window_start("12w", &clock), "12w");
            assert_eq!(window_start("yesterday", &clock), "yesterday");
            assert_eq!(window_start("", &clock), "");
        }

        #[test]
        fn it_passes_absurdly_large_windows_through() {
            let clock = FrozenClock::default();
            assert_eq!(window_start("99999999999d", &clock), "99999999999d");
        }
    }

    mod has_age {
        use super::super::*;
        use crate::test_utils::FrozenClock;

        struct ThingWithAge {
            created_utc: DateTime<Utc>,
        }

        impl ThingWithAge {
            /// A thing created `secs` seconds before the frozen test clock's now.
            fn seconds_old(secs: i64) -> Self {
                let created_utc = FrozenClock::default().now() - TimeDelta::seconds(secs);
                Self { created_utc }
            }
        }

        impl HasAge for ThingWithAge {
            fn created_utc(&self) -> DateTime<Utc> {
                self.created_utc
            }
        }

        #[test]
        fn it_formats_ages_under_an_hour_in_minutes() {
            let clock = FrozenClock::default();
            assert_eq!(ThingWithAge::seconds_old(30).relative_age(&clock), "0m ago");
            assert_eq!(ThingWithAge::seconds_old(150).relative_age(&clock), "2m ago");
            assert_eq!(ThingWithAge::seconds_old(3599).relative_age(&clock), "59m ago");
        }

        #[test]
        fn it_formats_ages_under_a_day_in_hours() {
            let clock = FrozenClock::default();
            assert_eq!(ThingWithAge::seconds_old(3661).relative_age(&clock), "1h ago");
            assert_eq!(ThingWithAge::seconds_old(86_399).relative_age(&clock), "23h ago");
        }

        #[test]
        fn it_formats_older_ages_in_days() {
            let clock = FrozenClock::default();
            assert_eq!(ThingWithAge::seconds_old(90_000).relative_age(&clock), "1d ago");
            assert_eq!(
                ThingWithAge::seconds_old(86_400 * 30).relative_age(&clock),
                "30d ago"
            );
        }

        #[test]
        fn it_returns_its_age() {
            let clock = FrozenClock::default();
            let age = ThingWithAge::seconds_old(3661).age(&clock);
            assert_eq!(age.num_seconds(), 3661);
        }
    }
}
