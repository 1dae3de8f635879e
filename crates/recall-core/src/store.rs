//! [`ReviewStore`] — the in-memory keyed store of review records.
//!
//! The store owns the `card id → record` mapping and is the only place where
//! records change. Mutation goes through [`ReviewStore::review_card_at`],
//! which needs `&mut self`; a host that shares one store between threads
//! wraps it in a mutex, so two reviews of the same card can never interleave.
//!
//! Persistence is not the store's business. Callers take the record returned
//! by a review (or a [`Snapshot`]) and hand it to a
//! [`ReviewPersistence`](crate::persist::ReviewPersistence) backend.

use std::collections::{BTreeMap, btree_map::Entry};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  card::{CardId, CardReviewRecord},
  quality::Quality,
  schedule::Scheduler,
  snapshot::Snapshot,
};

// ─── Summary ─────────────────────────────────────────────────────────────────

/// Counts over a set of card ids, as shown on a deck overview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSummary {
  pub total:    usize,
  pub due:      usize,
  pub mastered: usize,
  /// Everything not yet mastered, reviewed or not.
  pub learning: usize,
  /// Cards with no review record at all.
  pub unseen:   usize,
}

// ─── Store ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ReviewStore {
  reviews:   BTreeMap<CardId, CardReviewRecord>,
  scheduler: Scheduler,
}

impl ReviewStore {
  pub fn new(scheduler: Scheduler) -> Self {
    Self { reviews: BTreeMap::new(), scheduler }
  }

  /// Rebuild a store from a previously saved snapshot.
  pub fn from_snapshot(snapshot: Snapshot, scheduler: Scheduler) -> Self {
    Self { reviews: snapshot.into_inner(), scheduler }
  }

  pub fn scheduler(&self) -> Scheduler { self.scheduler }

  /// A copy of every record, for a persistence adapter to save verbatim.
  pub fn snapshot(&self) -> Snapshot { Snapshot::from(self.reviews.clone()) }

  pub fn into_snapshot(self) -> Snapshot { Snapshot::from(self.reviews) }

  /// Swap the whole mapping (import or reset), returning the old contents.
  pub fn replace(&mut self, snapshot: Snapshot) -> Snapshot {
    Snapshot::from(std::mem::replace(&mut self.reviews, snapshot.into_inner()))
  }

  pub fn len(&self) -> usize { self.reviews.len() }

  pub fn is_empty(&self) -> bool { self.reviews.is_empty() }

  pub fn get(&self, card_id: &str) -> Option<&CardReviewRecord> { self.reviews.get(card_id) }

  pub fn records(&self) -> impl Iterator<Item = &CardReviewRecord> { self.reviews.values() }

  /// When the card is next due, or `None` if it has never been reviewed.
  pub fn next_review_at(&self, card_id: &str) -> Option<DateTime<Utc>> {
    self.get(card_id).and_then(|r| r.next_review_at)
  }

  // ── Mutation ─────────────────────────────────────────────────────────────

  /// Record a review event. Each call advances the card's state; the
  /// returned record is what is now stored.
  pub fn review_card(&mut self, card_id: impl Into<CardId>, quality: Quality) -> &CardReviewRecord {
    self.review_card_at(card_id, quality, Utc::now())
  }

  pub fn review_card_at(
    &mut self,
    card_id: impl Into<CardId>,
    quality: Quality,
    now: DateTime<Utc>,
  ) -> &CardReviewRecord {
    let scheduler = self.scheduler;
    match self.reviews.entry(card_id.into()) {
      Entry::Occupied(mut slot) => {
        let next = scheduler.update(slot.key(), Some(slot.get()), quality, now);
        slot.insert(next);
        slot.into_mut()
      }
      Entry::Vacant(slot) => {
        let next = scheduler.update(slot.key(), None, quality, now);
        slot.insert(next)
      }
    }
  }

  /// Rate a review from a raw integer, rejecting values outside `1..=5`.
  pub fn review_card_checked_at(
    &mut self,
    card_id: impl Into<CardId>,
    quality: i64,
    now: DateTime<Utc>,
  ) -> Result<&CardReviewRecord> {
    let quality = Quality::new(quality)?;
    Ok(self.review_card_at(card_id, quality, now))
  }

  // ── Queries ──────────────────────────────────────────────────────────────

  /// Unknown ids are due.
  pub fn is_due_at(&self, card_id: &str, now: DateTime<Utc>) -> bool {
    self.get(card_id).is_none_or(|r| r.is_due(now))
  }

  /// Unknown ids are not mastered.
  pub fn is_mastered(&self, card_id: &str) -> bool {
    self.get(card_id).is_some_and(CardReviewRecord::is_mastered)
  }

  pub fn due_cards<I>(&self, card_ids: I) -> Vec<CardId>
  where
    I: IntoIterator,
    I::Item: AsRef<str>,
  {
    self.due_cards_at(card_ids, Utc::now())
  }

  /// The due subset of `card_ids`, in input order. Ids that are not in the
  /// input are never returned.
  pub fn due_cards_at<I>(&self, card_ids: I, now: DateTime<Utc>) -> Vec<CardId>
  where
    I: IntoIterator,
    I::Item: AsRef<str>,
  {
    card_ids
      .into_iter()
      .filter(|id| self.is_due_at(id.as_ref(), now))
      .map(|id| CardId::from(id.as_ref()))
      .collect()
  }

  /// The mastered subset of `card_ids`, in input order.
  pub fn mastered_cards<I>(&self, card_ids: I) -> Vec<CardId>
  where
    I: IntoIterator,
    I::Item: AsRef<str>,
  {
    card_ids
      .into_iter()
      .filter(|id| self.is_mastered(id.as_ref()))
      .map(|id| CardId::from(id.as_ref()))
      .collect()
  }

  pub fn summary_at<I>(&self, card_ids: I, now: DateTime<Utc>) -> DeckSummary
  where
    I: IntoIterator,
    I::Item: AsRef<str>,
  {
    card_ids
      .into_iter()
      .fold(DeckSummary::default(), |mut acc, id| {
        let id = id.as_ref();
        acc.total += 1;
        match self.get(id) {
          None => {
            acc.unseen += 1;
            acc.due += 1;
            acc.learning += 1;
          }
          Some(r) => {
            if r.is_due(now) {
              acc.due += 1;
            }
            if r.is_mastered() {
              acc.mastered += 1;
            } else {
              acc.learning += 1;
            }
          }
        }
        acc
      })
  }
}
