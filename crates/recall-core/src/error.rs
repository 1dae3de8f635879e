//! Error types for `recall-core`.

use thiserror::Error;

use crate::card::CardId;

#[derive(Debug, Error)]
pub enum Error {
  #[error("quality must be between 1 and 5, got {0}")]
  InvalidQuality(i64),

  #[error("not a quality rating: {0:?}")]
  QualityParse(String),

  #[error("snapshot key {key} holds the record for card {card_id}")]
  CardIdMismatch { key: CardId, card_id: CardId },

  #[error("timestamp parse error: {0}")]
  TimestampParse(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
