//! Display pattern tokens for local-time rendering.
//!
//! The admin screens describe formats with CLDR-style letters
//! ("MMMM d, yyyy h:mm a"); chrono speaks strftime. [`to_strftime`] bridges
//! the two so screen configuration never has to mention `%` specifiers.

/// Long date + 12-hour time, e.g. "August 15, 2025 7:30 PM".
pub const LONG_DATE_TIME: &str = "MMMM d, yyyy h:mm a";

/// Long date only, e.g. "August 15, 2025".
pub const LONG_DATE: &str = "MMMM d, yyyy";

/// Translate a token pattern into a chrono strftime string.
///
/// Runs of the same letter map by length (`MMMM` -> `%B`, `d` -> `%-d`).
/// Unrecognized characters pass through as literals, `%` is escaped.
pub fn to_strftime(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let chars: Vec<char> = pattern.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_alphabetic() {
            let mut run = 1;
            while i + run < chars.len() && chars[i + run] == c {
                run += 1;
            }
            match translate_run(c, run) {
                Some(spec) => out.push_str(spec),
                None => {
                    for _ in 0..run {
                        out.push(c);
                    }
                }
            }
            i += run;
        } else {
            if c == '%' {
                out.push_str("%%");
            } else {
                out.push(c);
            }
            i += 1;
        }
    }
    out
}

fn translate_run(letter: char, len: usize) -> Option<&'static str> {
    let spec = match (letter, len) {
        ('y', 2) => "%y",
        ('y', _) => "%Y",
        ('M', 4..) => "%B",
        ('M', 3) => "%b",
        ('M', 2) => "%m",
        ('M', 1) => "%-m",
        ('d', 2..) => "%d",
        ('d', 1) => "%-d",
        ('H', 2..) => "%H",
        ('H', 1) => "%-H",
        ('h', 2..) => "%I",
        ('h', 1) => "%-I",
        ('m', 2..) => "%M",
        ('m', 1) => "%-M",
        ('s', 2..) => "%S",
        ('s', 1) => "%-S",
        ('a', _) => "%p",
        _ => return None,
    };
    Some(spec)
}
