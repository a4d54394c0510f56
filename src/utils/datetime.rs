//! Wall-clock timestamp parsing and the wire formats used by the lease backend.
//!
//! Every timestamp in this crate is a [`NaiveDateTime`]: local wall-clock time with no zone
//! attached. Inputs come from `datetime-local` style fields, so parsing is lenient about the
//! date/time separator and about seconds.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Format used for lease start and end bounds sent to the backend.
pub const LOCAL_MINUTE_FORMAT: &str = "%Y-%m-%d %H:%M";
/// Format used for `created_at` audit timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses a wall-clock timestamp, returning `None` when the input is blank or malformed.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM[:SS[.fff]]` with either `T` or a space as the
/// separator, and RFC 3339 strings. An explicit offset is dropped after reading the wall
/// clock it describes.
pub fn parse_wall_clock(input: &str) -> Option<NaiveDateTime> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed);
        }
    }
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(with_offset.naive_local());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// `YYYY-MM-DD HH:MM`, the precision of a `datetime-local` input.
pub fn format_local_minute(value: NaiveDateTime) -> String {
    value.format(LOCAL_MINUTE_FORMAT).to_string()
}

/// `YYYY-MM-DD HH:MM:SS.mmm`.
pub fn format_timestamp(value: NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// Serde adapter for wall-clock fields that arrive in any format [`parse_wall_clock`] accepts.
pub mod wall_clock {
    use chrono::NaiveDateTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_timestamp(*value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_wall_clock(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp `{raw}`")))
    }
}
