//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{DateTime, Duration, TimeZone, Utc};
use recall_core::{
  CardReviewRecord, Quality, ReviewStore, Scheduler, Snapshot,
  persist::ReviewPersistence,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn now() -> DateTime<Utc> { Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap() }

fn reviewed(id: &str, repetitions: u32, interval: u32) -> CardReviewRecord {
  CardReviewRecord {
    ease_factor: 2.36,
    interval,
    repetitions,
    last_reviewed_at: Some(now()),
    next_review_at: Some(now() + Duration::days(i64::from(interval))),
    ..CardReviewRecord::fresh(id.into())
  }
}

// ─── Load / save ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_store_loads_empty_snapshot() {
  let s = store().await;
  let snapshot = s.load().await.unwrap();
  assert!(snapshot.is_empty());
  assert_eq!(s.count().await.unwrap(), 0);
}

#[tokio::test]
async fn save_and_load_record() {
  let s = store().await;
  let record = reviewed("ownership", 2, 6);
  s.save_record(record.clone()).await.unwrap();

  let snapshot = s.load().await.unwrap();
  assert_eq!(snapshot.len(), 1);
  assert_eq!(snapshot.get("ownership"), Some(&record));
}

#[tokio::test]
async fn fresh_record_keeps_null_timestamps() {
  let s = store().await;
  s.save_record(CardReviewRecord::fresh("new".into()))
    .await
    .unwrap();

  let snapshot = s.load().await.unwrap();
  let r = snapshot.get("new").unwrap();
  assert!(r.last_reviewed_at.is_none());
  assert!(r.next_review_at.is_none());
}

#[tokio::test]
async fn save_record_overwrites_existing_row() {
  let s = store().await;
  s.save_record(reviewed("a", 1, 1)).await.unwrap();
  s.save_record(reviewed("a", 3, 17)).await.unwrap();

  assert_eq!(s.count().await.unwrap(), 1);
  let snapshot = s.load().await.unwrap();
  let r = snapshot.get("a").unwrap();
  assert_eq!(r.repetitions, 3);
  assert_eq!(r.interval, 17);
}

#[tokio::test]
async fn load_is_ordered_by_card_id() {
  let s = store().await;
  for id in ["c", "a", "b"] {
    s.save_record(reviewed(id, 1, 1)).await.unwrap();
  }

  let ids: Vec<String> = s
    .load()
    .await
    .unwrap()
    .records()
    .map(|r| r.card_id.to_string())
    .collect();
  assert_eq!(ids, ["a", "b", "c"]);
}

// ─── Bulk operations ─────────────────────────────────────────────────────────

#[tokio::test]
async fn replace_all_drops_previous_rows() {
  let s = store().await;
  s.save_record(reviewed("old", 1, 1)).await.unwrap();

  let incoming = Snapshot::from_records([reviewed("x", 3, 21), reviewed("y", 0, 1)]);
  s.replace_all(incoming.clone()).await.unwrap();

  let loaded = s.load().await.unwrap();
  assert_eq!(loaded, incoming);
  assert!(loaded.get("old").is_none());
}

#[tokio::test]
async fn clear_deletes_everything() {
  let s = store().await;
  s.save_record(reviewed("a", 1, 1)).await.unwrap();
  s.save_record(reviewed("b", 1, 1)).await.unwrap();

  s.clear().await.unwrap();
  assert_eq!(s.count().await.unwrap(), 0);
}

// ─── Save after call ─────────────────────────────────────────────────────────

#[tokio::test]
async fn reviews_survive_a_reload() {
  let s = store().await;
  let mut reviews = ReviewStore::from_snapshot(s.load().await.unwrap(), Scheduler::default());

  for quality in [5, 5, 5] {
    let record = reviews
      .review_card_at("tcp", Quality::new(quality).unwrap(), now())
      .clone();
    s.save_record(record).await.unwrap();
  }

  let reloaded = ReviewStore::from_snapshot(s.load().await.unwrap(), Scheduler::default());
  let r = reloaded.get("tcp").unwrap();
  assert_eq!(r.repetitions, 3);
  assert_eq!(r.interval, 17);
  assert_eq!(r, reviews.get("tcp").unwrap());
  assert!(reloaded.due_cards_at(["tcp"], now()).is_empty());
  assert_eq!(reloaded.due_cards_at(["tcp", "other"], now() + Duration::days(17)).len(), 2);
}

#[tokio::test]
async fn file_backed_store_persists_across_connections() {
  let dir = std::env::temp_dir().join(format!("recall-store-test-{}", std::process::id()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("reviews.db");
  let _ = std::fs::remove_file(&path);

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.save_record(reviewed("kept", 2, 6)).await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  let snapshot = s.load().await.unwrap();
  assert_eq!(snapshot.get("kept").unwrap().interval, 6);

  drop(s);
  let _ = std::fs::remove_dir_all(&dir);
}
