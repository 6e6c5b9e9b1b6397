//! Canonical ISO 8601 date/time formatting.
//!
//! Normalizes semantic date/time values to their canonical textual form and
//! guarantees that a serialized value always round-trips to the same
//! calendar date.

use crate::error::FacadeError;
use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Output precision requested from the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// `YYYY-MM-DD`
    DateOnly,
    /// `YYYY-MM-DDTHH:MM:SS` plus `Z` or an explicit `±HH:MM` offset
    DateTime,
}

/// A semantic date/time value.
///
/// Offsets are carried, not interpreted: an instant constructed with a
/// non-UTC offset keeps that offset through normalization. Conversion to UTC
/// only happens through the explicit [`Timestamp::to_utc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    Date(NaiveDate),
    Instant(DateTime<FixedOffset>),
}

impl Timestamp {
    /// Builds a date-only timestamp from calendar components.
    ///
    /// # Errors
    ///
    /// Returns [`FacadeError::InvalidTimestamp`] for out-of-range components
    /// (e.g., February 30th).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, FacadeError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self::Date)
            .ok_or_else(|| {
                FacadeError::invalid_timestamp(format!(
                    "{year:04}-{month:02}-{day:02} is not a valid calendar date"
                ))
            })
    }

    /// Builds an instant from calendar and clock components plus an offset
    /// in seconds east of UTC.
    ///
    /// # Errors
    ///
    /// Returns [`FacadeError::InvalidTimestamp`] for out-of-range date, time,
    /// or offset components (offsets must be within ±24 hours).
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        offset_seconds: i32,
    ) -> Result<Self, FacadeError> {
        let offset = FixedOffset::east_opt(offset_seconds).ok_or_else(|| {
            FacadeError::invalid_timestamp(format!("offset {offset_seconds}s is out of range"))
        })?;

        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
            .and_then(|naive| naive.and_local_timezone(offset).single())
            .map(Self::Instant)
            .ok_or_else(|| {
                FacadeError::invalid_timestamp(format!(
                    "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02} is not a valid date/time"
                ))
            })
    }

    /// The current instant, in UTC.
    pub fn now() -> Self {
        Self::Instant(Utc::now().fixed_offset())
    }

    /// Parses a canonical-form string: `YYYY-MM-DD` or RFC 3339.
    ///
    /// Fractional seconds are accepted here and truncated by [`normalize`];
    /// the canonical form is seconds precision.
    ///
    /// # Errors
    ///
    /// Returns [`FacadeError::InvalidTimestamp`] for malformed strings and
    /// out-of-range components.
    pub fn parse(input: &str) -> Result<Self, FacadeError> {
        if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
            return Ok(Self::Date(date));
        }

        DateTime::parse_from_rfc3339(input)
            .map(Self::Instant)
            .map_err(|e| FacadeError::invalid_timestamp(format!("{input:?}: {e}")))
    }

    /// The natural granularity of this value.
    pub fn granularity(&self) -> Granularity {
        match self {
            Self::Date(_) => Granularity::DateOnly,
            Self::Instant(_) => Granularity::DateTime,
        }
    }

    /// Explicit conversion to UTC. Date-only values are offset-free and pass
    /// through unchanged.
    pub fn to_utc(&self) -> Self {
        match self {
            Self::Date(date) => Self::Date(*date),
            Self::Instant(instant) => Self::Instant(instant.with_timezone(&Utc).fixed_offset()),
        }
    }
}

/// Formats a timestamp at the requested granularity.
///
/// # Rules
///
/// 1. Date at `DateOnly` formats as `YYYY-MM-DD`
/// 2. Instant at `DateTime` formats as RFC 3339 at seconds precision, `Z`
///    for UTC, explicit `±HH:MM` otherwise; the carried offset is preserved,
///    never shifted
/// 3. Instant at `DateOnly` takes the calendar date in the instant's own
///    offset, again without silent conversion
/// 4. Date at `DateTime` fails: the value has no time components and the
///    normalizer refuses to fabricate them
///
/// # Errors
///
/// Returns [`FacadeError::InvalidTimestamp`] for rule 4.
pub fn normalize(value: &Timestamp, granularity: Granularity) -> Result<String, FacadeError> {
    match (value, granularity) {
        (Timestamp::Date(date), Granularity::DateOnly) => {
            Ok(date.format("%Y-%m-%d").to_string())
        }
        (Timestamp::Date(date), Granularity::DateTime) => Err(FacadeError::invalid_timestamp(
            format!("date-only value {date} has no time components"),
        )),
        (Timestamp::Instant(instant), Granularity::DateOnly) => {
            Ok(instant.date_naive().format("%Y-%m-%d").to_string())
        }
        (Timestamp::Instant(instant), Granularity::DateTime) => {
            Ok(instant.to_rfc3339_opts(SecondsFormat::Secs, true))
        }
    }
}

/// Canonical form at the value's own granularity.
impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Instant(instant) => {
                f.write_str(&instant.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
        }
    }
}

impl FromStr for Timestamp {
    type Err = FacadeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
