//! Review sessions: one pass through the cards that were due when the
//! session started.
//!
//! The due queue is fixed at start. Rating a card reviews it in the store
//! and moves on; a card failed during the session is not requeued until the
//! session is restarted.

use std::ops::AddAssign;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  card::{CardId, CardReviewRecord},
  quality::Quality,
  store::ReviewStore,
};

/// Tally of ratings given during a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
  pub total:   usize,
  /// Ratings of 3 or better.
  pub correct: usize,
  pub wrong:   usize,
}

impl AddAssign for SessionStats {
  fn add_assign(&mut self, other: Self) {
    self.total += other.total;
    self.correct += other.correct;
    self.wrong += other.wrong;
  }
}

#[derive(Debug, Clone, Default)]
pub struct ReviewSession {
  queue:    Vec<CardId>,
  position: usize,
  stats:    SessionStats,
}

impl ReviewSession {
  /// Start a session over the due subset of `card_ids`.
  pub fn start_at<I>(store: &ReviewStore, card_ids: I, now: DateTime<Utc>) -> Self
  where
    I: IntoIterator,
    I::Item: AsRef<str>,
  {
    Self {
      queue:    store.due_cards_at(card_ids, now),
      position: 0,
      stats:    SessionStats::default(),
    }
  }

  /// Recompute the due queue and clear the stats.
  pub fn restart_at<I>(&mut self, store: &ReviewStore, card_ids: I, now: DateTime<Utc>)
  where
    I: IntoIterator,
    I::Item: AsRef<str>,
  {
    *self = Self::start_at(store, card_ids, now);
  }

  /// The card awaiting a rating, or `None` once the queue is exhausted.
  pub fn current(&self) -> Option<&CardId> { self.queue.get(self.position) }

  /// Zero-based index of the current card within the queue.
  pub fn position(&self) -> usize { self.position }

  pub fn len(&self) -> usize { self.queue.len() }

  pub fn is_empty(&self) -> bool { self.queue.is_empty() }

  pub fn remaining(&self) -> usize { self.queue.len() - self.position }

  pub fn is_complete(&self) -> bool { self.position >= self.queue.len() }

  pub fn stats(&self) -> SessionStats { self.stats }

  /// Review the current card and advance. Returns the card's new record, or
  /// `None` if the session was already complete.
  pub fn rate_at<'s>(
    &mut self,
    store: &'s mut ReviewStore,
    quality: Quality,
    now: DateTime<Utc>,
  ) -> Option<&'s CardReviewRecord> {
    let card_id = self.queue.get(self.position)?.clone();

    self.position += 1;
    self.stats.total += 1;
    if quality.is_passing() {
      self.stats.correct += 1;
    } else {
      self.stats.wrong += 1;
    }

    Some(store.review_card_at(card_id, quality, now))
  }
}

#[cfg(test)]
mod tests {
  use chrono::{Duration, TimeZone};

  use super::*;

  fn now() -> DateTime<Utc> { Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap() }

  fn q(n: i64) -> Quality { Quality::new(n).unwrap() }

  #[test]
  fn walks_the_due_queue_once() {
    let mut store = ReviewStore::default();
    store.review_card_at("later", q(5), now());

    let mut session = ReviewSession::start_at(&store, ["a", "later", "b"], now());
    assert_eq!(session.len(), 2);
    assert_eq!(session.current().map(CardId::as_str), Some("a"));

    let r = session.rate_at(&mut store, q(4), now()).unwrap();
    assert_eq!(r.card_id.as_str(), "a");
    assert_eq!(session.current().map(CardId::as_str), Some("b"));
    assert_eq!(session.remaining(), 1);

    session.rate_at(&mut store, q(1), now()).unwrap();
    assert!(session.is_complete());
    assert!(session.current().is_none());
    assert!(session.rate_at(&mut store, q(5), now()).is_none());

    assert_eq!(session.stats(), SessionStats { total: 2, correct: 1, wrong: 1 });
    assert_eq!(store.len(), 3);
  }

  #[test]
  fn stats_add_up_across_passes() {
    let mut totals = SessionStats { total: 2, correct: 1, wrong: 1 };
    totals += SessionStats { total: 3, correct: 3, wrong: 0 };
    assert_eq!(totals, SessionStats { total: 5, correct: 4, wrong: 1 });
  }

  #[test]
  fn nothing_due_is_complete_immediately() {
    let mut store = ReviewStore::default();
    store.review_card_at("a", q(5), now());

    let session = ReviewSession::start_at(&store, ["a"], now());
    assert!(session.is_empty());
    assert!(session.is_complete());
  }

  #[test]
  fn restart_picks_up_newly_due_cards() {
    let mut store = ReviewStore::default();
    let mut session = ReviewSession::start_at(&store, ["a", "b"], now());
    session.rate_at(&mut store, q(5), now());
    session.rate_at(&mut store, q(2), now());
    assert!(session.is_complete());

    session.restart_at(&store, ["a", "b"], now() + Duration::days(1));
    assert_eq!(session.len(), 2);
    assert_eq!(session.position(), 0);
    assert_eq!(session.stats(), SessionStats::default());
  }
}
