//! marquee-core: fixed-zone time conversion for the Marquee events admin.
//!
//! The backend speaks UTC; the admin screens render and edit wall-clock
//! time in one fixed zone, America/Toronto. This crate is that boundary:
//! DST-aware display formatting, civil edit-field parsing, zone snapshots,
//! and operating-hours checks. Display-oriented operations never fail;
//! only civil-input parsing does.

pub mod convert;
pub mod error;
pub mod hours;
pub mod pattern;

pub use convert::{
    TimezoneSnapshot, ZONE, ZONE_NAME, civil_input_value, format_for_civil_input, format_instant,
    format_local, format_local_with, is_daylight_saving_active, is_daylight_saving_active_at,
    parse_civil_input, parse_civil_input_instant, timezone_snapshot, timezone_snapshot_at,
};
pub use error::{ConversionError, Result};
pub use hours::{
    HourRange, format_hour_range, is_within_operating_hours, is_within_operating_hours_at,
};
pub use pattern::{LONG_DATE, LONG_DATE_TIME, to_strftime};
