//! Operating-hours helpers for venue listings.
//!
//! Hours are stored as local `HH:MM` pairs per day; an empty side means
//! closed, and a close at or before the open runs past midnight into the
//! next day.

use chrono::{DateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::convert::ZONE;

const HHMM_FMT: &str = "%H:%M";
const DISPLAY_FMT: &str = "%-I:%M %p";

/// A daily open/close pair in Toronto wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourRange {
    pub open: String,
    pub close: String,
}

impl HourRange {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.open.is_empty() || self.close.is_empty()
    }

    /// Close at or before open reads as running into the next day.
    pub fn spans_midnight(&self) -> bool {
        match (parse_hhmm(&self.open), parse_hhmm(&self.close)) {
            (Some(open), Some(close)) => close <= open,
            _ => false,
        }
    }

    /// "9:00 AM - 5:00 PM", or "Closed" when either side is missing or
    /// unreadable. Formatting only, no overnight logic.
    pub fn format(&self) -> String {
        if self.is_closed() {
            return "Closed".to_string();
        }
        match (parse_hhmm(&self.open), parse_hhmm(&self.close)) {
            (Some(open), Some(close)) => format!(
                "{} - {}",
                open.format(DISPLAY_FMT),
                close.format(DISPLAY_FMT)
            ),
            _ => {
                warn!(open = %self.open, close = %self.close, "unreadable hour range");
                "Closed".to_string()
            }
        }
    }

    /// Whether `now` falls inside the range, bounds inclusive, in Toronto
    /// wall-clock terms. Overnight ranges include the stretch after
    /// midnight on the following civil day.
    pub fn contains(&self, now: DateTime<Utc>) -> bool {
        let (Some(open), Some(close)) = (parse_hhmm(&self.open), parse_hhmm(&self.close)) else {
            if !self.is_closed() {
                warn!(open = %self.open, close = %self.close, "unreadable hour range");
            }
            return false;
        };
        let local = now.with_timezone(&ZONE).time();
        // Minute precision: the closing minute itself still counts.
        let t = local
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(local);
        if close <= open {
            t >= open || t <= close
        } else {
            t >= open && t <= close
        }
    }

    pub fn contains_now(&self) -> bool {
        self.contains(Utc::now())
    }
}

fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, HHMM_FMT).ok()
}

/// Free-function forms matching how the admin screens call these.
pub fn format_hour_range(open: &str, close: &str) -> String {
    HourRange::new(open, close).format()
}

/// Whether "now" falls inside the open/close pair. Empty or unreadable
/// input is false, never an error.
pub fn is_within_operating_hours(open: &str, close: &str) -> bool {
    HourRange::new(open, close).contains_now()
}

/// Deterministic form of [`is_within_operating_hours`].
pub fn is_within_operating_hours_at(open: &str, close: &str, now: DateTime<Utc>) -> bool {
    HourRange::new(open, close).contains(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn formats_day_range() {
        assert_eq!(format_hour_range("09:00", "17:00"), "9:00 AM - 5:00 PM");
        assert_eq!(format_hour_range("22:00", "02:00"), "10:00 PM - 2:00 AM");
    }

    #[test]
    fn empty_side_is_closed() {
        assert_eq!(format_hour_range("", "17:00"), "Closed");
        assert_eq!(format_hour_range("09:00", ""), "Closed");
        assert_eq!(format_hour_range("", ""), "Closed");
    }

    #[test]
    fn unreadable_side_is_closed() {
        assert_eq!(format_hour_range("9am", "17:00"), "Closed");
    }

    #[test]
    fn detects_midnight_span() {
        assert!(HourRange::new("22:00", "02:00").spans_midnight());
        assert!(HourRange::new("09:00", "09:00").spans_midnight());
        assert!(!HourRange::new("09:00", "17:00").spans_midnight());
    }

    #[test]
    fn day_range_membership() {
        // 2025-08-15 is EDT (UTC-4): 16:00Z is noon in Toronto.
        assert!(is_within_operating_hours_at(
            "09:00",
            "17:00",
            utc("2025-08-15T16:00:00Z")
        ));
        // 08:30 local, before opening.
        assert!(!is_within_operating_hours_at(
            "09:00",
            "17:00",
            utc("2025-08-15T12:30:00Z")
        ));
    }

    #[test]
    fn bounds_are_inclusive() {
        // Exactly 09:00 and 17:00 local.
        assert!(is_within_operating_hours_at(
            "09:00",
            "17:00",
            utc("2025-08-15T13:00:00Z")
        ));
        assert!(is_within_operating_hours_at(
            "09:00",
            "17:00",
            utc("2025-08-15T21:00:00Z")
        ));
        // Seconds within the closing minute still count.
        assert!(is_within_operating_hours_at(
            "09:00",
            "17:00",
            utc("2025-08-15T21:00:45Z")
        ));
    }

    #[test]
    fn overnight_range_includes_after_midnight() {
        // Open 22:00, close 02:00. 05:00Z on Aug 16 is 01:00 local, inside
        // the window that started the previous evening.
        assert!(is_within_operating_hours_at(
            "22:00",
            "02:00",
            utc("2025-08-16T05:00:00Z")
        ));
        // 23:00 local the same evening, inside.
        assert!(is_within_operating_hours_at(
            "22:00",
            "02:00",
            utc("2025-08-16T03:00:00Z")
        ));
        // 03:00 local, after close.
        assert!(!is_within_operating_hours_at(
            "22:00",
            "02:00",
            utc("2025-08-16T07:00:00Z")
        ));
    }

    #[test]
    fn empty_or_unreadable_is_never_within() {
        let now = utc("2025-08-15T16:00:00Z");
        assert!(!is_within_operating_hours_at("", "17:00", now));
        assert!(!is_within_operating_hours_at("09:00", "", now));
        assert!(!is_within_operating_hours_at("9am", "17:00", now));
    }

    #[test]
    fn membership_tracks_local_clock_across_winter() {
        // 2025-01-15 is EST (UTC-5): 16:00Z is 11:00 in Toronto.
        assert!(is_within_operating_hours_at(
            "09:00",
            "17:00",
            utc("2025-01-15T16:00:00Z")
        ));
        assert!(!is_within_operating_hours_at(
            "09:00",
            "17:00",
            utc("2025-01-15T13:30:00Z")
        ));
    }
}
