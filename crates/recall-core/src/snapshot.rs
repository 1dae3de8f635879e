//! [`Snapshot`] — the serialisable form of a review store.
//!
//! A snapshot is a flat map from card id to record. Its JSON form is a single
//! object keyed by card id, which is what a key-value persistence layer saves
//! under [`STORAGE_KEY`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  card::{CardId, CardReviewRecord},
};

/// Fixed storage name for the review mapping.
pub const STORAGE_KEY: &str = "flashcard-reviews";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(BTreeMap<CardId, CardReviewRecord>);

impl Snapshot {
  /// Build a snapshot from loose records, keyed by their own card ids. A
  /// later record for the same id wins.
  pub fn from_records(records: impl IntoIterator<Item = CardReviewRecord>) -> Self {
    records.into_iter().collect()
  }

  /// Parse a JSON object keyed by card id.
  ///
  /// Values are loaded verbatim; the only check is that every key matches
  /// the `cardId` of the record stored under it.
  pub fn from_json(json: &str) -> Result<Self> {
    let snapshot: Self = serde_json::from_str(json)?;
    snapshot.check_keys()?;
    Ok(snapshot)
  }

  /// Like [`Snapshot::from_json`], for JSON that has already been parsed.
  pub fn from_value(value: serde_json::Value) -> Result<Self> {
    let snapshot: Self = serde_json::from_value(value)?;
    snapshot.check_keys()?;
    Ok(snapshot)
  }

  pub fn to_json(&self) -> Result<String> { Ok(serde_json::to_string_pretty(self)?) }

  pub fn insert(&mut self, record: CardReviewRecord) -> Option<CardReviewRecord> {
    self.0.insert(record.card_id.clone(), record)
  }

  pub fn get(&self, card_id: &str) -> Option<&CardReviewRecord> { self.0.get(card_id) }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn records(&self) -> impl Iterator<Item = &CardReviewRecord> { self.0.values() }

  pub fn into_inner(self) -> BTreeMap<CardId, CardReviewRecord> { self.0 }

  fn check_keys(&self) -> Result<()> {
    match self.0.iter().find(|(key, record)| **key != record.card_id) {
      Some((key, record)) => Err(Error::CardIdMismatch {
        key:     key.clone(),
        card_id: record.card_id.clone(),
      }),
      None => Ok(()),
    }
  }
}

impl From<BTreeMap<CardId, CardReviewRecord>> for Snapshot {
  fn from(map: BTreeMap<CardId, CardReviewRecord>) -> Self { Self(map) }
}

impl FromIterator<CardReviewRecord> for Snapshot {
  fn from_iter<T: IntoIterator<Item = CardReviewRecord>>(iter: T) -> Self {
    Self(iter.into_iter().map(|r| (r.card_id.clone(), r)).collect())
  }
}

impl IntoIterator for Snapshot {
  type IntoIter = std::collections::btree_map::IntoValues<CardId, CardReviewRecord>;
  type Item = CardReviewRecord;

  fn into_iter(self) -> Self::IntoIter { self.0.into_values() }
}
