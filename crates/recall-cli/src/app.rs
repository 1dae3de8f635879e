//! Application state: the in-memory review store plus the persistence
//! backend it is saved to.
//!
//! Every mutation is applied to the [`ReviewStore`] first and then written
//! through to the backend before the next command runs.

use std::io::{BufRead, Write};

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use recall_core::{
  CardId, CardReviewRecord, Quality, ReviewStore, Scheduler, Snapshot,
  persist::ReviewPersistence,
  session::{ReviewSession, SessionStats},
  store::DeckSummary,
};

use crate::render;

// ─── App ──────────────────────────────────────────────────────────────────────

pub struct App<P> {
  reviews:     ReviewStore,
  persistence: P,
}

impl<P: ReviewPersistence> App<P> {
  /// Load every stored record into memory.
  pub async fn load(persistence: P, scheduler: Scheduler) -> anyhow::Result<Self> {
    let snapshot = persistence
      .load()
      .await
      .context("loading review records")?;
    tracing::debug!(records = snapshot.len(), ?scheduler, "review store loaded");
    Ok(Self { reviews: ReviewStore::from_snapshot(snapshot, scheduler), persistence })
  }

  pub fn reviews(&self) -> &ReviewStore { &self.reviews }

  /// Ids from the command line, or every stored card when none were given.
  pub fn ids_or_known(&self, ids: Vec<String>) -> Vec<String> {
    if ids.is_empty() {
      self.reviews.records().map(|r| r.card_id.to_string()).collect()
    } else {
      ids
    }
  }

  // ── Mutations ─────────────────────────────────────────────────────────────

  /// Record a review and save the resulting record.
  pub async fn review(
    &mut self,
    card_id: CardId,
    quality: Quality,
    now: DateTime<Utc>,
  ) -> anyhow::Result<CardReviewRecord> {
    let record = self.reviews.review_card_at(card_id, quality, now).clone();
    self
      .persistence
      .save_record(record.clone())
      .await
      .with_context(|| format!("saving review of {}", record.card_id))?;
    tracing::info!(
      card_id = %record.card_id,
      %quality,
      interval = record.interval,
      repetitions = record.repetitions,
      "review recorded"
    );
    Ok(record)
  }

  /// Replace every record with the contents of `snapshot`.
  pub async fn import(&mut self, snapshot: Snapshot) -> anyhow::Result<usize> {
    let count = snapshot.len();
    self
      .persistence
      .replace_all(snapshot.clone())
      .await
      .context("replacing stored review records")?;
    self.reviews.replace(snapshot);
    tracing::info!(records = count, "review records imported");
    Ok(count)
  }

  /// Delete every record.
  pub async fn reset(&mut self) -> anyhow::Result<usize> {
    self
      .persistence
      .clear()
      .await
      .context("clearing review records")?;
    let removed = self.reviews.replace(Snapshot::default()).len();
    tracing::info!(records = removed, "review records cleared");
    Ok(removed)
  }

  // ── Queries ───────────────────────────────────────────────────────────────

  pub fn due(&self, ids: &[String], now: DateTime<Utc>) -> Vec<CardId> {
    self.reviews.due_cards_at(ids, now)
  }

  pub fn mastered(&self, ids: &[String]) -> Vec<CardId> { self.reviews.mastered_cards(ids) }

  pub fn summary(&self, ids: &[String], now: DateTime<Utc>) -> DeckSummary {
    self.reviews.summary_at(ids, now)
  }

  pub fn export_json(&self) -> anyhow::Result<String> {
    self
      .reviews
      .snapshot()
      .to_json()
      .context("serialising review records")
  }

  // ── Interactive session ───────────────────────────────────────────────────

  /// Walk the due subset of `ids`, reading one rating per card from `input`.
  ///
  /// A line of `q` ends the session early; anything that is not a rating
  /// from 1 to 5 is reported and asked again. Each rating is saved before
  /// the next card is shown. When a pass finishes, the reviewer may start
  /// another over whatever is due by then. Returns the stats of all passes.
  pub async fn run_session<R, W>(
    &mut self,
    ids: &[String],
    mut input: R,
    mut output: W,
    clock: impl Fn() -> DateTime<Utc>,
  ) -> anyhow::Result<SessionStats>
  where
    R: BufRead,
    W: Write,
  {
    let mut session = ReviewSession::start_at(&self.reviews, ids, clock());
    let mut totals = SessionStats::default();
    let mut line = String::new();

    loop {
      if session.is_empty() {
        writeln!(output, "Nothing is due. Come back later.")?;
        break;
      }

      let mut quit = false;
      while let Some(card_id) = session.current().cloned() {
        write!(
          output,
          "[{}/{}] {card_id}  rate 1-5, q to quit: ",
          session.position() + 1,
          session.len()
        )?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
          writeln!(output)?;
          quit = true;
          break;
        }
        let answer = line.trim();
        if answer.eq_ignore_ascii_case("q") {
          quit = true;
          break;
        }

        let quality = match answer.parse::<Quality>() {
          Ok(q) => q,
          Err(e) => {
            writeln!(output, "  {e}")?;
            continue;
          }
        };

        let now = clock();
        let record = session
          .rate_at(&mut self.reviews, quality, now)
          .cloned()
          .context("session advanced past its last card")?;
        self
          .persistence
          .save_record(record.clone())
          .await
          .with_context(|| format!("saving review of {card_id}"))?;
        writeln!(output, "  {}", render::next_review(&record, now))?;
      }

      let round = session.stats();
      totals += round;
      writeln!(output, "{}", render::session_stats(&round))?;
      if quit {
        break;
      }

      write!(output, "Review again? [y/N]: ")?;
      output.flush()?;
      line.clear();
      if input.read_line(&mut line)? == 0 || !line.trim().eq_ignore_ascii_case("y") {
        break;
      }
      session.restart_at(&self.reviews, ids, clock());
    }

    tracing::info!(total = totals.total, correct = totals.correct, "session finished");
    Ok(totals)
  }
}
