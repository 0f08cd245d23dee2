use serde::{self, Deserialize, Deserializer, Serializer};
use time::{Date, macros::format_description};

use crate::entities::clock_time::ClockTime;

// A form value that should be text but may be anything.
#[derive(Deserialize)]
#[serde(untagged)]
#[allow(dead_code)]
enum TextOrOther {
    Text(String),
    Other(serde::de::IgnoredAny),
}

// Accepts plain ISO dates as well as date-time strings ("2025-03-04T00:00:00.000Z");
// anything after the date part is ignored.
pub fn parse_iso_date(date_str: &str) -> Result<Date, String> {
    let trimmed = date_str.trim();
    let date_part = trimmed.split(['T', ' ']).next().unwrap_or(trimmed);

    Date::parse(date_part, &format_description!("[year]-[month]-[day]"))
        .map_err(|e| format!("Failed to parse date '{date_str}': {e}"))
}

pub mod iso_date {
    use super::{Date, Deserialize, Deserializer, Serializer, format_description, serde};

    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = date
            .format(&format_description!("[year]-[month]-[day]"))
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let date_str = String::deserialize(deserializer)?;
        super::parse_iso_date(&date_str).map_err(serde::de::Error::custom)
    }
}

// Wall-clock times as typed into a form. Empty or unreadable values become `None`.
pub mod clock_time_option {
    use super::{ClockTime, Deserialize, Deserializer, Serializer, TextOrOther};

    pub fn serialize<S>(time: &Option<ClockTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(time) => serializer.collect_str(time),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<ClockTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<TextOrOther>::deserialize(deserializer)? {
            Some(TextOrOther::Text(s)) => Ok(ClockTime::parse_lenient(&s)),
            Some(TextOrOther::Other(_)) | None => Ok(None),
        }
    }
}

pub mod rfc3339 {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use time::{OffsetDateTime, format_description::well_known::Rfc3339};

    pub fn serialize<S>(datetime: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = datetime
            .format(&Rfc3339)
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let datetime_str = String::deserialize(deserializer)?;
        OffsetDateTime::parse(datetime_str.trim(), &Rfc3339).map_err(serde::de::Error::custom)
    }
}

// Optional timestamps written by the web client. Unreadable values become `None`.
pub mod rfc3339_option {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use time::{OffsetDateTime, format_description::well_known::Rfc3339};

    pub fn serialize<S>(
        datetime: &Option<OffsetDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match datetime {
            Some(datetime) => super::rfc3339::serialize(datetime, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<super::TextOrOther>::deserialize(deserializer)? {
            Some(super::TextOrOther::Text(s)) => Ok(OffsetDateTime::parse(s.trim(), &Rfc3339).ok()),
            Some(super::TextOrOther::Other(_)) | None => Ok(None),
        }
    }
}
