//! The `ReviewPersistence` trait.
//!
//! Implemented by storage backends (e.g. `recall-store-sqlite`). The
//! scheduler never calls it: a host loads a [`Snapshot`] at startup, then
//! saves each record a review returns ("save after call").

use std::future::Future;

use crate::{card::CardReviewRecord, snapshot::Snapshot};

/// Abstraction over a durable home for review records.
///
/// Records are saved verbatim; the backend neither validates nor derives
/// scheduling state. All methods return `Send` futures so the trait can be
/// used from multi-threaded async runtimes.
pub trait ReviewPersistence: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read every stored record.
  fn load(&self) -> impl Future<Output = Result<Snapshot, Self::Error>> + Send + '_;

  /// Insert or overwrite the record for `record.card_id`.
  fn save_record(
    &self,
    record: CardReviewRecord,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Atomically replace the whole stored mapping (import).
  fn replace_all(
    &self,
    snapshot: Snapshot,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Delete every stored record (reset).
  fn clear(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
