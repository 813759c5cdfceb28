use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::warn;

/// Wall-clock patterns seen in the trip exports, most common first.
const FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parse a trip timestamp into local wall-clock time.
///
/// Handles:
/// * `YYYY-MM-DD HH:MM:SS`, optionally with fractional seconds or a `T`
///   separator.
/// * RFC 3339 with an offset or `Z` suffix; the offset is dropped and the
///   local wall-clock time kept, since the exports record station-local time.
/// * US-style `MM/DD/YYYY HH:MM[:SS]`.
/// * A bare `YYYY-MM-DD`, read as midnight.
///
/// Returns `None` for empty or unrecognised strings.
pub fn parse_trip_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive);
        }
    }

    let normalised = match s.strip_suffix('Z') {
        Some(stripped) => format!("{stripped}+00:00"),
        None => s.to_string(),
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalised) {
        return Some(dt.naive_local());
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    warn!("could not parse trip timestamp \"{}\"", s);
    None
}
