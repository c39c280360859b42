//! Wire datetime handling.
//!
//! Note timestamps cross the wire as `%Y-%m-%dT%H:%M:%S%.6f` (microsecond
//! precision) and UpdateNote matches on that value verbatim, so the format
//! must round-trip exactly: what FetchNotes emits, parse_wire_datetime must
//! read back to the identical instant. Timestamps are therefore truncated to
//! whole microseconds before they are ever persisted.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};

use crate::error::{Error, Result};

/// Output format for note timestamps: six fractional digits, always.
pub const WIRE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

// Accepts any fractional-second width on input; output is normalized to six.
const WIRE_DATETIME_PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a timestamp for the wire.
pub fn format_wire_datetime(dt: &DateTime<Utc>) -> String {
    dt.format(WIRE_DATETIME_FORMAT).to_string()
}

/// Parse a wire timestamp (interpreted as UTC).
pub fn parse_wire_datetime(s: &str) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(s, WIRE_DATETIME_PARSE_FORMAT)
        .map_err(|e| Error::InvalidInput(format!("Invalid dateTime '{}': {}", s, e)))?;
    Ok(Utc.from_utc_datetime(&naive))
}

/// Parse a calendar-date filter (`YYYY-MM-DD`).
pub fn parse_wire_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, WIRE_DATE_FORMAT)
        .map_err(|e| Error::InvalidInput(format!("Invalid selectedDate '{}': {}", s, e)))
}

/// Drop sub-microsecond precision.
///
/// Postgres stores microseconds; truncating before insert keeps the stored
/// value identical to what the wire format can express.
pub fn truncate_to_micros(dt: DateTime<Utc>) -> DateTime<Utc> {
    let micros = dt.nanosecond() / 1_000 * 1_000;
    dt.with_nanosecond(micros).unwrap_or(dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_always_six_fraction_digits() {
        let dt = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
        assert_eq!(format_wire_datetime(&dt), "2026-03-14T09:26:53.000000");
    }

    #[test]
    fn test_round_trip_preserves_microseconds() {
        let dt = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap()
            + Duration::microseconds(123_456);
        let wire = format_wire_datetime(&dt);
        assert_eq!(wire, "2026-03-14T09:26:53.123456");
        assert_eq!(parse_wire_datetime(&wire).unwrap(), dt);
    }

    #[test]
    fn test_truncate_then_format_round_trips() {
        let dt = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap()
            + Duration::nanoseconds(123_456_789);
        let stored = truncate_to_micros(dt);
        let wire = format_wire_datetime(&stored);
        assert_eq!(parse_wire_datetime(&wire).unwrap(), stored);
    }

    #[test]
    fn test_truncate_drops_sub_microsecond_only() {
        let dt = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap()
            + Duration::nanoseconds(123_456_789);
        let stored = truncate_to_micros(dt);
        assert_eq!(stored.nanosecond(), 123_456_000);
    }

    #[test]
    fn test_parse_accepts_shorter_fractions() {
        let dt = parse_wire_datetime("2026-03-14T09:26:53.5").unwrap();
        assert_eq!(dt.nanosecond(), 500_000_000);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_wire_datetime("2026-03-14 09:26:53").is_err());
        assert!(parse_wire_datetime("not a datetime").is_err());
        assert!(parse_wire_datetime("").is_err());
    }

    #[test]
    fn test_parse_error_is_invalid_input() {
        match parse_wire_datetime("nope") {
            Err(Error::InvalidInput(msg)) => assert!(msg.contains("nope")),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_wire_date() {
        let d = parse_wire_date("2026-03-14").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2026, 3, 14).unwrap());
        assert!(parse_wire_date("14-03-2026").is_err());
    }
}
