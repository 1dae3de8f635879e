//! [`SqliteStore`] — the SQLite implementation of [`ReviewPersistence`].

use std::path::Path;

use recall_core::{CardReviewRecord, Snapshot, persist::ReviewPersistence};

use crate::{
  Error, Result,
  encode::{RawRecord, UPSERT},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// Review records backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "opening review store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Number of stored records.
  pub async fn count(&self) -> Result<usize> {
    let n: i64 = self
      .conn
      .call(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM card_reviews", [], |r| r.get(0))?))
      .await?;
    usize::try_from(n).map_err(|_| Error::OutOfRange { column: "COUNT(*)", value: n })
  }
}

// ─── ReviewPersistence impl ──────────────────────────────────────────────────

impl ReviewPersistence for SqliteStore {
  type Error = Error;

  async fn load(&self) -> Result<Snapshot> {
    let raws: Vec<RawRecord> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM card_reviews ORDER BY card_id",
          RawRecord::COLUMNS
        ))?;
        let rows = stmt
          .query_map([], RawRecord::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let snapshot = raws
      .into_iter()
      .map(RawRecord::into_record)
      .collect::<Result<Snapshot>>()?;

    tracing::debug!(records = snapshot.len(), "loaded review records");
    Ok(snapshot)
  }

  async fn save_record(&self, record: CardReviewRecord) -> Result<()> {
    let raw = RawRecord::encode(&record);
    tracing::debug!(card_id = %record.card_id, "saving review record");

    self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare_cached(UPSERT)?;
        raw.execute(&mut stmt)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn replace_all(&self, snapshot: Snapshot) -> Result<()> {
    let raws: Vec<RawRecord> = snapshot.records().map(RawRecord::encode).collect();
    tracing::debug!(records = raws.len(), "replacing all review records");

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM card_reviews", [])?;
        {
          let mut stmt = tx.prepare(UPSERT)?;
          for raw in &raws {
            raw.execute(&mut stmt)?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn clear(&self) -> Result<()> {
    let deleted = self
      .conn
      .call(|conn| Ok(conn.execute("DELETE FROM card_reviews", [])?))
      .await?;
    tracing::debug!(deleted, "cleared review records");
    Ok(())
  }
}
