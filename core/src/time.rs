use crate::error::{DocumentError, TimeFormatError};
use chrono::{DateTime, Duration, NaiveDateTime, SubsecRound, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Format accepted for window boundaries.
/// The fractional part is mandatory, the offset may be written as `+HHMM` or `+HH:MM`.
pub const ISO8601_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Format every document timestamp is rendered with
pub const RENDER_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f%:z";

/// Timestamps without an offset, read as UTC
const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Byte position of the fraction separator in `YYYY-MM-DDTHH:MM:SS.`
const FRACTION_INDEX: usize = 19;

/// Current time, truncated to the precision timestamps are persisted with
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Next `updated_at` for a document last written at `prev`.
/// Never returns a value at or before `prev`, even if the clock stalls.
pub fn advance(prev: DateTime<Utc>) -> DateTime<Utc> {
    let now = now();
    if now > prev {
        now
    } else {
        prev + Duration::microseconds(1)
    }
}

/// Strict window boundary parser.
/// A space where the offset sign belongs is read as `+`, since an unencoded
/// `+` in a query string arrives decoded as a space.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, TimeFormatError> {
    if raw.as_bytes().get(FRACTION_INDEX) != Some(&b'.') {
        return Err(TimeFormatError(raw.to_owned()));
    }
    let restored;
    let input = match raw.rfind(' ') {
        Some(idx) if idx > FRACTION_INDEX => {
            restored = format!("{}+{}", &raw[..idx], &raw[idx + 1..]);
            restored.as_str()
        }
        _ => raw,
    };
    DateTime::parse_from_str(input, ISO8601_FORMAT)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| TimeFormatError(raw.to_owned()))
}

pub fn render_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format(RENDER_FORMAT).to_string()
}

/// Half open `[start, end)` range over `created_at`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        TimeWindow { start, end }
    }

    /// Parses optional query boundaries, defaulting to the last 24 hours
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, TimeFormatError> {
        let now = now();
        let start = match start {
            Some(raw) => parse_timestamp(raw)?,
            None => now - Duration::days(1),
        };
        let end = match end {
            Some(raw) => parse_timestamp(raw)?,
            None => now,
        };
        Ok(TimeWindow { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        self.start <= *at && *at < self.end
    }
}

/// serde adapter for document timestamps
pub mod timestamp {
    use super::*;

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&render_timestamp(dt))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_any(&raw).map_err(serde::de::Error::custom)
    }

    /// Lenient document timestamp parser: RFC 3339, an ISO 8601 offset with
    /// or without colon and fraction, or a naive local time taken as UTC
    pub(crate) fn parse_any(raw: &str) -> Result<DateTime<Utc>, DocumentError> {
        let parsed = DateTime::parse_from_rfc3339(raw)
            .or_else(|_| DateTime::parse_from_str(raw, ISO8601_FORMAT))
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|_| {
                NaiveDateTime::parse_from_str(raw, NAIVE_FORMAT)
                    .map(|naive| Utc.from_utc_datetime(&naive))
            })
            .map_err(|_| DocumentError::InvalidTimestamp(raw.to_owned()))?;
        Ok(parsed.trunc_subsecs(6))
    }
}

/// serde adapter for lists of timestamps, used by actuator schedules
pub mod timestamp_list {
    use super::*;
    use serde::ser::SerializeSeq;

    pub fn serialize<S>(list: &[DateTime<Utc>], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(list.len()))?;
        for dt in list {
            seq.serialize_element(&render_timestamp(dt))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Vec::<String>::deserialize(deserializer)?;
        raw.iter()
            .map(|s| timestamp::parse_any(s).map_err(serde::de::Error::custom))
            .collect()
    }
}
