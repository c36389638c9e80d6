//! Dates cross the storage boundary anchored to midnight UTC
//! (`YYYY-MM-DDT00:00:00.000Z`) so a local timezone offset can never move a
//! transaction onto a neighbouring calendar day.

use chrono::{DateTime, NaiveDate, Utc};

use crate::errors::{FinanceError, Result};

pub const ANCHOR_FORMAT: &str = "%Y-%m-%dT00:00:00.000Z";

pub fn to_anchor_string(date: NaiveDate) -> String {
    date.format(ANCHOR_FORMAT).to_string()
}

/// Accepts the anchored form, any RFC 3339 timestamp (taken as its UTC day) or a
/// bare `YYYY-MM-DD`.
pub fn parse_anchor(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.with_timezone(&Utc).date_naive());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| FinanceError::Validation(format!("invalid date `{}`", value)))
}

/// Serde adapter for `#[serde(with = "...")]` on `NaiveDate` fields.
pub mod utc_midnight {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::to_anchor_string(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_anchor(&raw).map_err(serde::de::Error::custom)
    }
}
