//! SQL schema for the Recall SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per reviewed card. Cards that were never reviewed have no row.
CREATE TABLE IF NOT EXISTS card_reviews (
    card_id          TEXT PRIMARY KEY,
    ease_factor      REAL    NOT NULL,
    interval_days    INTEGER NOT NULL CHECK (interval_days >= 0),
    repetitions      INTEGER NOT NULL CHECK (repetitions >= 0),
    last_reviewed_at TEXT,             -- ISO 8601 UTC, millisecond precision
    next_review_at   TEXT              -- NULL means due now
);

CREATE INDEX IF NOT EXISTS card_reviews_next_idx ON card_reviews(next_review_at);

PRAGMA user_version = 1;
";
