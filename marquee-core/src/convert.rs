//! UTC-instant <-> Toronto-civil conversion.
//!
//! The backend stores UTC; the admin screens render and edit wall-clock
//! time in one fixed zone. Everything here is a pure function of
//! (input, tzdata). Display-oriented operations swallow resolution
//! failures and log them; only [`parse_civil_input`] fails loudly, since
//! it is the last stop before a timestamp reaches the backend.

use std::sync::OnceLock;

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::{OffsetComponents, OffsetName, Tz};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConversionError, Result};
use crate::pattern::{self, LONG_DATE_TIME};

/// The one zone the admin displays in. Not configurable per call.
pub const ZONE: Tz = chrono_tz::America::Toronto;

/// IANA name of [`ZONE`].
pub const ZONE_NAME: &str = "America/Toronto";

/// Edit-field shape: minute precision, no seconds, no zone suffix.
const CIVIL_INPUT_FMT: &str = "%Y-%m-%dT%H:%M";

/// Backend wire shape: millisecond precision, explicit Z.
const UTC_MILLIS_FMT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

fn civil_grammar() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // chrono's numeric parsing tolerates unpadded fields; the edit-field
    // contract does not, so validate shape before parsing.
    RE.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}(:\d{2})?$")
            .expect("civil grammar regex is a valid literal")
    })
}

/// Resolved zone info for one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimezoneSnapshot {
    pub zone: String,
    pub abbreviation: String,
    /// Numeric UTC offset, `+HH:MM` / `-HH:MM`.
    pub offset: String,
    pub is_dst: bool,
}

impl TimezoneSnapshot {
    /// Fallback when an instant cannot be resolved: standard time.
    pub fn standard_time() -> Self {
        Self {
            zone: ZONE_NAME.to_string(),
            abbreviation: "EST".to_string(),
            offset: "-05:00".to_string(),
            is_dst: false,
        }
    }
}

/// Render an instant as Toronto wall-clock time with a token pattern.
pub fn format_instant(instant: DateTime<Utc>, display_pattern: &str) -> String {
    instant
        .with_timezone(&ZONE)
        .format(&pattern::to_strftime(display_pattern))
        .to_string()
}

/// Default long rendering for list and detail screens.
///
/// `None` and `""` mean "no value", not an error. Anything unresolvable
/// comes back unchanged so a render path never breaks on bad data.
pub fn format_local(raw: Option<&str>) -> String {
    format_local_with(raw, LONG_DATE_TIME)
}

/// [`format_local`] with a caller-supplied token pattern.
pub fn format_local_with(raw: Option<&str>, display_pattern: &str) -> String {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return String::new();
    };
    match resolve_instant(raw) {
        Some(instant) => format_instant(instant, display_pattern),
        None => {
            warn!(input = raw, "unresolvable instant, displaying raw value");
            raw.to_string()
        }
    }
}

/// Shape an instant for a civil date-time edit field (`YYYY-MM-DDTHH:MM`).
pub fn civil_input_value(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&ZONE)
        .format(CIVIL_INPUT_FMT)
        .to_string()
}

/// Edit-field variant of [`format_local`]: empty on no value or failure.
pub fn format_for_civil_input(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return String::new();
    };
    match resolve_instant(raw) {
        Some(instant) => civil_input_value(instant),
        None => {
            warn!(input = raw, "unresolvable instant, leaving edit field empty");
            String::new()
        }
    }
}

/// Interpret a civil edit-field value as Toronto wall-clock time and return
/// the UTC instant in the backend wire shape (`YYYY-MM-DDTHH:MM:SS.sssZ`).
pub fn parse_civil_input(input: &str) -> Result<String> {
    Ok(parse_civil_input_instant(input)?
        .format(UTC_MILLIS_FMT)
        .to_string())
}

/// Typed form of [`parse_civil_input`].
///
/// Accepts `YYYY-MM-DDTHH:MM` or `YYYY-MM-DDTHH:MM:SS`. DST policy at the
/// two annual transitions:
/// - ambiguous fall-back times resolve to the earlier instant (EDT side);
/// - nonexistent spring-forward times shift forward by the length of the
///   gap, landing on the time the clock actually showed.
pub fn parse_civil_input_instant(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ConversionError::InvalidArgument(
            "empty civil date-time".to_string(),
        ));
    }
    if !civil_grammar().is_match(input) {
        return Err(ConversionError::InvalidArgument(format!(
            "'{input}' does not match YYYY-MM-DDTHH:MM"
        )));
    }
    let naive = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(input, CIVIL_INPUT_FMT))
        .map_err(|e| ConversionError::InvalidArgument(format!("'{input}': {e}")))?;
    Ok(civil_to_instant(naive))
}

/// Resolve a Toronto wall-clock time to the UTC timeline.
fn civil_to_instant(naive: NaiveDateTime) -> DateTime<Utc> {
    match ZONE.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earlier, _) => earlier.with_timezone(&Utc),
        LocalResult::None => {
            // Spring-forward gap; Toronto's is exactly one hour.
            let shifted = naive + Duration::hours(1);
            match ZONE.from_local_datetime(&shifted) {
                LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
                    dt.with_timezone(&Utc)
                }
                // Unreachable for a one-hour gap.
                LocalResult::None => Utc.from_utc_datetime(&shifted),
            }
        }
    }
}

/// True iff the offset in effect at the instant carries a DST component.
///
/// `None` evaluates "now". Never fails: unresolvable input reads as
/// standard time.
pub fn is_daylight_saving_active(raw: Option<&str>) -> bool {
    match optional_instant(raw) {
        Some(instant) => is_daylight_saving_active_at(instant),
        None => false,
    }
}

pub fn is_daylight_saving_active_at(instant: DateTime<Utc>) -> bool {
    instant.with_timezone(&ZONE).offset().dst_offset() > Duration::zero()
}

/// Zone info for display next to time fields.
///
/// `None` evaluates "now"; an unresolvable instant yields the
/// standard-time fallback, never an error.
pub fn timezone_snapshot(raw: Option<&str>) -> TimezoneSnapshot {
    match optional_instant(raw) {
        Some(instant) => timezone_snapshot_at(instant),
        None => TimezoneSnapshot::standard_time(),
    }
}

pub fn timezone_snapshot_at(instant: DateTime<Utc>) -> TimezoneSnapshot {
    let local = instant.with_timezone(&ZONE);
    let offset = local.offset();
    let is_dst = offset.dst_offset() > Duration::zero();
    TimezoneSnapshot {
        zone: ZONE_NAME.to_string(),
        abbreviation: offset
            .abbreviation()
            .unwrap_or(if is_dst { "EDT" } else { "EST" })
            .to_string(),
        offset: offset_string(offset.fix().local_minus_utc()),
        is_dst,
    }
}

/// Parse the instant shapes the backend hands us: RFC 3339 (the canonical
/// UTC wire form) or epoch milliseconds.
fn resolve_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    raw.parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis)
}

/// `None` means "now"; `Some` must resolve or we log and give up.
fn optional_instant(raw: Option<&str>) -> Option<DateTime<Utc>> {
    match raw {
        None => Some(Utc::now()),
        Some(s) => {
            let resolved = resolve_instant(s);
            if resolved.is_none() {
                warn!(input = s, "unresolvable instant, using fallback");
            }
            resolved
        }
    }
}

fn offset_string(seconds: i32) -> String {
    let sign = if seconds < 0 { '-' } else { '+' };
    let abs = seconds.abs();
    format!("{}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60)
}
