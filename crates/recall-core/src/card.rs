//! Card identity and the per-card scheduling record.
//!
//! A record is created lazily on a card's first review. A card with no record
//! is treated exactly like a fresh one: due now and not mastered.

use std::{borrow::Borrow, fmt};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Thresholds ──────────────────────────────────────────────────────────────

/// Ease factor of a card that has never been reviewed.
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Lower bound on the ease factor after any update.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Consecutive qualifying reviews required before a card counts as mastered.
pub const MASTERY_REPETITIONS: u32 = 3;

/// Interval, in days, required before a card counts as mastered.
pub const MASTERY_INTERVAL_DAYS: u32 = 21;

// ─── CardId ──────────────────────────────────────────────────────────────────

/// Opaque identifier of a flashcard, owned by the external content catalog.
#[derive(
  Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
  pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for CardId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for CardId {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

impl From<String> for CardId {
  fn from(s: String) -> Self { Self(s) }
}

impl AsRef<str> for CardId {
  fn as_ref(&self) -> &str { &self.0 }
}

impl Borrow<str> for CardId {
  fn borrow(&self) -> &str { &self.0 }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// Scheduling state for one flashcard.
///
/// Serialised with camelCase field names and ISO 8601 timestamps so that a
/// snapshot is a flat, storage-agnostic `id → record` map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardReviewRecord {
  pub card_id:          CardId,
  /// Growth multiplier for the interval; never below [`MIN_EASE_FACTOR`].
  pub ease_factor:      f64,
  /// Days between the last review and the next one.
  pub interval:         u32,
  /// Consecutive reviews rated 3 or better since the last failure.
  pub repetitions:      u32,
  #[serde(default, with = "crate::timestamp::option")]
  pub last_reviewed_at: Option<DateTime<Utc>>,
  /// `None` means the card has never been scheduled and is due now.
  #[serde(default, with = "crate::timestamp::option")]
  pub next_review_at:   Option<DateTime<Utc>>,
}

impl CardReviewRecord {
  /// The state of a card that has never been reviewed.
  pub fn fresh(card_id: CardId) -> Self {
    Self {
      card_id,
      ease_factor: DEFAULT_EASE_FACTOR,
      interval: 0,
      repetitions: 0,
      last_reviewed_at: None,
      next_review_at: None,
    }
  }

  pub fn is_due(&self, now: DateTime<Utc>) -> bool {
    self.next_review_at.is_none_or(|at| at <= now)
  }

  /// Both thresholds must hold at once; a long interval alone (e.g. from an
  /// import) is not enough.
  pub fn is_mastered(&self) -> bool {
    self.repetitions >= MASTERY_REPETITIONS && self.interval >= MASTERY_INTERVAL_DAYS
  }
}
