//! Timestamp text form shared by the JSON snapshot and storage backends.
//!
//! Timestamps are written as ISO 8601 UTC with millisecond precision and a
//! `Z` suffix (`2026-10-18T09:30:00.000Z`). Strings in that one format sort
//! lexically in chronological order. Parsing accepts any RFC 3339 offset.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::{Error, Result};

pub fn format(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::TimestampParse(format!("{s:?}: {e}")))
}

/// `serde(with = ...)` adapter for `Option<DateTime<Utc>>` fields.
pub mod option {
  use chrono::{DateTime, Utc};
  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    match value {
      Some(dt) => serializer.serialize_some(&super::format(*dt)),
      None => serializer.serialize_none(),
    }
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
  where
    D: Deserializer<'de>,
  {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw
      .as_deref()
      .map(super::parse)
      .transpose()
      .map_err(serde::de::Error::custom)
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn formats_like_a_browser_iso_string() {
    let dt = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
    assert_eq!(format(dt), "2026-10-18T09:30:00.000Z");
  }

  #[test]
  fn parses_offsets_into_utc() {
    let dt = parse("2026-10-18T11:30:00+02:00").unwrap();
    assert_eq!(dt, Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap());
  }

  #[test]
  fn rejects_garbage() {
    assert!(matches!(parse("yesterday"), Err(Error::TimestampParse(_))));
  }

  #[test]
  fn formatted_strings_sort_chronologically() {
    let early = Utc.with_ymd_and_hms(2026, 1, 9, 23, 59, 59).unwrap();
    let late = Utc.with_ymd_and_hms(2026, 1, 10, 0, 0, 0).unwrap();
    assert!(format(early) < format(late));
  }
}
