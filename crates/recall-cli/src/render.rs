//! Plain-text rendering for command output.

use chrono::{DateTime, Utc};
use recall_core::{
  CardReviewRecord, session::SessionStats, store::DeckSummary, timestamp,
};

pub fn record(r: &CardReviewRecord, now: DateTime<Utc>) -> String {
  let next = match r.next_review_at {
    Some(at) if at <= now => format!("{} (due)", timestamp::format(at)),
    Some(at) => timestamp::format(at),
    None => "due now".to_owned(),
  };
  let last = r
    .last_reviewed_at
    .map(timestamp::format)
    .unwrap_or_else(|| "never".to_owned());

  format!(
    "card:         {}\n\
     ease factor:  {:.2}\n\
     interval:     {}\n\
     repetitions:  {}\n\
     last review:  {last}\n\
     next review:  {next}\n\
     mastered:     {}",
    r.card_id,
    r.ease_factor,
    days(r.interval),
    r.repetitions,
    if r.is_mastered() { "yes" } else { "no" },
  )
}

/// One line describing when a just-reviewed card comes back.
pub fn next_review(r: &CardReviewRecord, now: DateTime<Utc>) -> String {
  match r.next_review_at {
    Some(at) if at <= now => format!("{} is due again now", r.card_id),
    Some(at) => format!(
      "{} next due in {} ({})",
      r.card_id,
      days(r.interval),
      timestamp::format(at)
    ),
    None => format!("{} is due now", r.card_id),
  }
}

pub fn summary(s: &DeckSummary) -> String {
  format!(
    "total:     {}\ndue:       {}\nmastered:  {}\nlearning:  {}\nunseen:    {}",
    s.total, s.due, s.mastered, s.learning, s.unseen
  )
}

pub fn session_stats(s: &SessionStats) -> String {
  format!("Reviewed {} cards: {} remembered, {} to strengthen", s.total, s.correct, s.wrong)
}

fn days(n: u32) -> String {
  if n == 1 { "1 day".to_owned() } else { format!("{n} days") }
}
