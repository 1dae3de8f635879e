//! `recall` — spaced-repetition review scheduler on the command line.
//!
//! # Usage
//!
//! ```
//! recall review ownership 4
//! recall due --catalog cards.txt
//! recall session --catalog cards.txt
//! recall export --output flashcard-reviews.json
//! ```

mod app;
mod catalog;
mod render;
mod settings;

use std::{
  io,
  path::{Path, PathBuf},
};

use anyhow::Context as _;
use app::App;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use recall_core::{CardId, Quality, Scheduler, Snapshot, snapshot::STORAGE_KEY};
use recall_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::RecallConfig;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "recall", version, about = "Spaced-repetition review scheduler")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "recall.toml", global = true)]
  config: PathBuf,

  /// SQLite database to use instead of the configured `store_path`.
  #[arg(long, global = true)]
  store: Option<PathBuf>,

  /// Print machine-readable JSON instead of text.
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: Command,
}

/// Card ids from arguments and/or a catalog file.
#[derive(Args)]
struct CardSet {
  /// Card ids to consider. Defaults to every reviewed card.
  ids: Vec<String>,

  /// File with one card id per line (`#` starts a comment).
  #[arg(long, value_name = "FILE")]
  catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
  /// Record a review of one card.
  Review {
    card_id: String,
    /// Recall quality from 1 (forgot) to 5 (perfect).
    quality: Quality,
  },
  /// List the cards that are due now.
  Due(CardSet),
  /// List the cards that are mastered.
  Mastered(CardSet),
  /// Show the scheduling record of one card.
  Show { card_id: String },
  /// Count due, mastered and unseen cards.
  Summary(CardSet),
  /// Review the due cards interactively.
  Session(CardSet),
  /// Write every record as JSON.
  Export {
    /// Output file; stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,
  },
  /// Replace every record with a JSON export.
  Import { file: PathBuf },
  /// Delete every record.
  Reset,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Logs go to stderr so stdout stays parseable.
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let mut cfg = RecallConfig::load(&cli.config)?;
  if let Some(store) = cli.store {
    cfg.store_path = store;
  }

  if let Some(parent) = cfg.store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }

  let store = SqliteStore::open(&cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))?;
  let mut app = App::load(store, Scheduler::new(cfg.failure_policy)).await?;

  run(&mut app, cli.command, cli.json).await
}

async fn run(app: &mut App<SqliteStore>, command: Command, json: bool) -> anyhow::Result<()> {
  let now = Utc::now();

  match command {
    Command::Review { card_id, quality } => {
      let record = app.review(CardId::from(card_id), quality, now).await?;
      if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
      } else {
        println!("{}", render::next_review(&record, now));
      }
    }

    Command::Due(set) => {
      let ids = resolve(app, set)?;
      print_ids(&app.due(&ids, now), json)?;
    }

    Command::Mastered(set) => {
      let ids = resolve(app, set)?;
      print_ids(&app.mastered(&ids), json)?;
    }

    Command::Show { card_id } => match app.reviews().get(&card_id) {
      Some(record) if json => println!("{}", serde_json::to_string_pretty(record)?),
      Some(record) => println!("{}", render::record(record, now)),
      None if json => println!("null"),
      None => println!("{card_id}: never reviewed (due now)"),
    },

    Command::Summary(set) => {
      let ids = resolve(app, set)?;
      let summary = app.summary(&ids, now);
      if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
      } else {
        println!("{}", render::summary(&summary));
      }
    }

    Command::Session(set) => {
      let ids = resolve(app, set)?;
      let stdin = io::stdin();
      app
        .run_session(&ids, stdin.lock(), io::stdout(), Utc::now)
        .await?;
    }

    Command::Export { output } => {
      let text = app.export_json()?;
      match output {
        Some(path) => {
          std::fs::write(&path, text)
            .with_context(|| format!("writing {}", path.display()))?;
          eprintln!("wrote {} records to {}", app.reviews().len(), path.display());
        }
        None => println!("{text}"),
      }
    }

    Command::Import { file } => {
      let snapshot = read_snapshot(&file)?;
      let count = app.import(snapshot).await?;
      println!("imported {count} records from {}", file.display());
    }

    Command::Reset => {
      let count = app.reset().await?;
      println!("deleted {count} records");
    }
  }

  Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn resolve(app: &App<SqliteStore>, set: CardSet) -> anyhow::Result<Vec<String>> {
  let ids = catalog::collect(set.ids, set.catalog.as_deref())?;
  Ok(app.ids_or_known(ids))
}

fn print_ids(ids: &[CardId], json: bool) -> anyhow::Result<()> {
  if json {
    println!("{}", serde_json::to_string(ids)?);
  } else {
    for id in ids {
      println!("{id}");
    }
  }
  Ok(())
}

/// Read an export file. Accepts the bare `id → record` map or the same map
/// wrapped in an object under the storage key.
fn read_snapshot(path: &Path) -> anyhow::Result<Snapshot> {
  let text = std::fs::read_to_string(path)
    .with_context(|| format!("reading {}", path.display()))?;

  let mut value: serde_json::Value =
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
  let wrapped = value
    .get(STORAGE_KEY)
    .is_some_and(|inner| inner.get("cardId").is_none());
  if wrapped {
    value = value[STORAGE_KEY].take();
  }

  Snapshot::from_value(value).with_context(|| format!("loading records from {}", path.display()))
}
