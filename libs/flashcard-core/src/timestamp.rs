//! Serde helpers for persisted timestamps.
//!
//! Timestamps are written as RFC 3339 UTC strings. RFC 3339 only covers
//! years 0000 to 9999, so instants outside that range are written as integer
//! milliseconds since the Unix epoch instead. Reading also accepts the older
//! formats found in deck files: a date-only `YYYY-MM-DD` string (midnight
//! UTC) or epoch milliseconds.

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, Utc};
use serde::{de, Deserialize, Deserializer, Serializer};

pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    if fits_rfc3339(ts) {
        serializer.serialize_str(&format(*ts))
    } else {
        serializer.serialize_i64(ts.timestamp_millis())
    }
}

fn fits_rfc3339(ts: &DateTime<Utc>) -> bool {
    (0..=9999).contains(&ts.year())
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Millis(millis) => DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {millis}"))),
        RawTimestamp::Text(text) => parse(&text).map_err(de::Error::custom),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Text(String),
}

/// Format a timestamp the way deck files store it.
pub fn format(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse an RFC 3339 or date-only timestamp.
pub fn parse(text: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("invalid timestamp: {text}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Debug, serde::Serialize, serde::Deserialize)]
    struct Wrapper {
        #[serde(with = "super")]
        at: DateTime<Utc>,
    }

    #[test]
    fn reads_rfc3339_with_offset() {
        let w: Wrapper = serde_json::from_str(r#"{"at":"2024-03-01T12:00:00+02:00"}"#).unwrap();
        assert_eq!(w.at, Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn reads_date_only_as_midnight_utc() {
        let w: Wrapper = serde_json::from_str(r#"{"at":"2024-03-01"}"#).unwrap();
        assert_eq!(w.at, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn reads_epoch_millis() {
        let w: Wrapper = serde_json::from_str(r#"{"at":1709294400000}"#).unwrap();
        assert_eq!(w.at, Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        let result: Result<Wrapper, _> = serde_json::from_str(r#"{"at":"yesterday"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn writes_utc_with_z_suffix() {
        let w = Wrapper {
            at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        };
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, r#"{"at":"2024-03-01T12:00:00Z"}"#);
    }

    #[test]
    fn keeps_sub_second_precision() {
        let at = Utc.timestamp_opt(1_709_294_400, 123_456_789).unwrap();
        let json = serde_json::to_string(&Wrapper { at }).unwrap();
        let back: Wrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(back.at, at);
    }

    #[test]
    fn far_future_is_written_as_millis_and_reads_back() {
        let at = Utc.with_ymd_and_hms(30917, 9, 3, 8, 0, 0).unwrap();
        let json = serde_json::to_string(&Wrapper { at }).unwrap();
        assert_eq!(json, format!(r#"{{"at":{}}}"#, at.timestamp_millis()));
        let back: Wrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(back.at, at);
    }

    #[test]
    fn last_rfc3339_year_stays_a_string() {
        let at = Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 59).unwrap();
        let json = serde_json::to_string(&Wrapper { at }).unwrap();
        assert_eq!(json, r#"{"at":"9999-12-31T23:59:59Z"}"#);
        let back: Wrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(back.at, at);
    }

    #[test]
    fn latest_instant_survives_a_round_trip_to_the_millisecond() {
        let at = DateTime::<Utc>::MAX_UTC;
        let json = serde_json::to_string(&Wrapper { at }).unwrap();
        let back: Wrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(back.at.timestamp_millis(), at.timestamp_millis());
    }
}
