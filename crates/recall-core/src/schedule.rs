//! The SM-2 derived scheduling update.
//!
//! [`Scheduler::update`] is a pure function of the current record, the
//! rating and the caller-supplied clock. It never mutates its input; it
//! returns the record that should replace it.
//!
//! - Ease: `ease' = max(1.3, ease + 0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))`.
//! - Qualifying review (q >= 3): interval goes 1 day, then 6 days, then
//!   `round(interval * ease')`; the repetition streak grows by one.
//! - Failing review (q < 3): streak resets to 0, interval to 1 day.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  card::{CardId, CardReviewRecord, MIN_EASE_FACTOR},
  quality::Quality,
};

/// Interval after the first qualifying review.
const FIRST_INTERVAL_DAYS: u32 = 1;
/// Interval after the second consecutive qualifying review.
const SECOND_INTERVAL_DAYS: u32 = 6;
/// Interval after a failing review.
const RELEARN_INTERVAL_DAYS: u32 = 1;
/// Ceiling on any computed interval (about a century). Geometric growth
/// would otherwise push due dates past what `DateTime` can represent.
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

/// What a failing review does to the due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
  /// Due again one interval (a day) later. `next_review_at` always equals
  /// `last_reviewed_at + interval`.
  #[default]
  NextDay,
  /// Due again immediately, so the card comes back in the same sitting. The
  /// stored interval is still one day.
  DueNow,
}

/// Scheduling parameters. The default is the canonical behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheduler {
  #[serde(default)]
  pub failure_policy: FailurePolicy,
}

impl Scheduler {
  pub fn new(failure_policy: FailurePolicy) -> Self { Self { failure_policy } }

  /// Compute the record that follows a review of `card_id` rated `quality`
  /// at `now`. `current` is `None` for a card that has never been reviewed.
  pub fn update(
    &self,
    card_id: &CardId,
    current: Option<&CardReviewRecord>,
    quality: Quality,
    now: DateTime<Utc>,
  ) -> CardReviewRecord {
    let fresh;
    let current = match current {
      Some(r) => r,
      None => {
        fresh = CardReviewRecord::fresh(card_id.clone());
        &fresh
      }
    };

    let ease_factor = next_ease_factor(current.ease_factor, quality);

    let (interval, repetitions, next_review_at) = if quality.is_passing() {
      let interval = match current.repetitions {
        0 => FIRST_INTERVAL_DAYS,
        1 => SECOND_INTERVAL_DAYS,
        _ => ((f64::from(current.interval) * ease_factor).round() as u32).min(MAX_INTERVAL_DAYS),
      };
      (interval, current.repetitions.saturating_add(1), after(now, interval))
    } else {
      let next = match self.failure_policy {
        FailurePolicy::NextDay => after(now, RELEARN_INTERVAL_DAYS),
        FailurePolicy::DueNow => now,
      };
      (RELEARN_INTERVAL_DAYS, 0, next)
    };

    CardReviewRecord {
      card_id: card_id.clone(),
      ease_factor,
      interval,
      repetitions,
      last_reviewed_at: Some(now),
      next_review_at: Some(next_review_at),
    }
  }
}

/// [`Scheduler::update`] with the default [`FailurePolicy::NextDay`].
pub fn update(
  card_id: &CardId,
  current: Option<&CardReviewRecord>,
  quality: Quality,
  now: DateTime<Utc>,
) -> CardReviewRecord {
  Scheduler::default().update(card_id, current, quality, now)
}

fn next_ease_factor(ease: f64, quality: Quality) -> f64 {
  let miss = f64::from(5 - quality.get());
  (ease + (0.1 - miss * (0.08 + miss * 0.02))).max(MIN_EASE_FACTOR)
}

/// `now + n days`, saturating at the latest representable instant.
fn after(now: DateTime<Utc>, n: u32) -> DateTime<Utc> {
  now
    .checked_add_signed(Duration::days(i64::from(n)))
    .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
