//! Time and timestamp utilities
//!
//! All timestamps are UTC. On the wire they are truncated to whole seconds
//! and carry a trailing `Z` (`2025-01-10T23:00:00Z`).

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};

/// Current instant in UTC
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Format a timestamp at second precision with a trailing `Z`
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse an RFC 3339 timestamp into UTC
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

/// Midnight UTC of the day containing `ts`
pub fn start_of_day(ts: DateTime<Utc>) -> DateTime<Utc> {
    day_start(ts.date_naive())
}

/// Midnight UTC of `date`
pub fn day_start(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// One calendar day
pub fn one_day() -> Duration {
    Duration::days(1)
}

/// `YYYY-MM-DD` of `ts`
pub fn format_date(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

/// `YYYYMMDDHHMMSS` stamp used as the order-number prefix
pub fn second_stamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y%m%d%H%M%S").to_string()
}

/// Serde adapter for `DateTime<Utc>` fields at second precision
pub mod second_precision {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_timestamp(ts))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(de::Error::custom)
    }
}
