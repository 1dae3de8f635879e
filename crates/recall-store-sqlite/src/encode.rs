//! Encoding and decoding helpers between review records and the plain
//! column values stored in SQLite.
//!
//! Timestamps use the same ISO 8601 text as the JSON snapshot, so a column
//! compares lexically in chronological order. Integer columns are `i64` on
//! the SQLite side and checked on the way back into `u32`.

use chrono::{DateTime, Utc};
use recall_core::{CardId, CardReviewRecord, timestamp};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { timestamp::format(dt) }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> { Ok(timestamp::parse(s)?) }

// ─── Counters ────────────────────────────────────────────────────────────────

fn decode_count(column: &'static str, value: i64) -> Result<u32> {
  u32::try_from(value).map_err(|_| Error::OutOfRange { column, value })
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Column values of one `card_reviews` row.
pub struct RawRecord {
  pub card_id:          String,
  pub ease_factor:      f64,
  pub interval_days:    i64,
  pub repetitions:      i64,
  pub last_reviewed_at: Option<String>,
  pub next_review_at:   Option<String>,
}

impl RawRecord {
  /// Column order used by every `SELECT` in the store.
  pub const COLUMNS: &'static str =
    "card_id, ease_factor, interval_days, repetitions, last_reviewed_at, next_review_at";

  pub fn encode(record: &CardReviewRecord) -> Self {
    Self {
      card_id:          record.card_id.as_str().to_owned(),
      ease_factor:      record.ease_factor,
      interval_days:    i64::from(record.interval),
      repetitions:      i64::from(record.repetitions),
      last_reviewed_at: record.last_reviewed_at.map(encode_dt),
      next_review_at:   record.next_review_at.map(encode_dt),
    }
  }

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      card_id:          row.get(0)?,
      ease_factor:      row.get(1)?,
      interval_days:    row.get(2)?,
      repetitions:      row.get(3)?,
      last_reviewed_at: row.get(4)?,
      next_review_at:   row.get(5)?,
    })
  }

  pub fn into_record(self) -> Result<CardReviewRecord> {
    Ok(CardReviewRecord {
      card_id:          CardId::from(self.card_id),
      ease_factor:      self.ease_factor,
      interval:         decode_count("interval_days", self.interval_days)?,
      repetitions:      decode_count("repetitions", self.repetitions)?,
      last_reviewed_at: self.last_reviewed_at.as_deref().map(decode_dt).transpose()?,
      next_review_at:   self.next_review_at.as_deref().map(decode_dt).transpose()?,
    })
  }

  /// Bind this row to the `?1..?6` parameters of [`UPSERT`].
  pub fn execute(&self, stmt: &mut rusqlite::Statement<'_>) -> rusqlite::Result<usize> {
    stmt.execute(rusqlite::params![
      self.card_id,
      self.ease_factor,
      self.interval_days,
      self.repetitions,
      self.last_reviewed_at,
      self.next_review_at,
    ])
  }
}

/// Insert a record or overwrite the existing row for its card id.
pub const UPSERT: &str = "
INSERT INTO card_reviews (
  card_id, ease_factor, interval_days, repetitions, last_reviewed_at, next_review_at
) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
ON CONFLICT (card_id) DO UPDATE SET
  ease_factor      = excluded.ease_factor,
  interval_days    = excluded.interval_days,
  repetitions      = excluded.repetitions,
  last_reviewed_at = excluded.last_reviewed_at,
  next_review_at   = excluded.next_review_at";

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn negative_counts_are_rejected() {
    let raw = RawRecord {
      card_id:          "a".into(),
      ease_factor:      2.5,
      interval_days:    -4,
      repetitions:      0,
      last_reviewed_at: None,
      next_review_at:   None,
    };
    assert!(matches!(
      raw.into_record(),
      Err(Error::OutOfRange { column: "interval_days", value: -4 })
    ));
  }

  #[test]
  fn encode_then_decode_keeps_millisecond_timestamps() {
    let at = Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap();
    let mut record = CardReviewRecord::fresh("a".into());
    record.last_reviewed_at = Some(at);

    let raw = RawRecord::encode(&record);
    assert_eq!(raw.last_reviewed_at.as_deref(), Some("2026-10-18T08:00:00.000Z"));
    assert_eq!(raw.into_record().unwrap(), record);
  }
}
