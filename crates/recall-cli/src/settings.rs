//! Layered runtime configuration.
//!
//! Sources, lowest precedence first: built-in defaults, the TOML file given
//! with `--config` (optional), then `RECALL_*` environment variables. The
//! `--store` flag overrides the resulting `store_path`.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use recall_core::FailurePolicy;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct RecallConfig {
  /// SQLite database holding review records. A leading `~/` is expanded.
  #[serde(default = "default_store_path")]
  pub store_path:     PathBuf,
  /// What a failing review does to the due date.
  #[serde(default)]
  pub failure_policy: FailurePolicy,
}

fn default_store_path() -> PathBuf { PathBuf::from("~/.local/share/recall/reviews.db") }

impl RecallConfig {
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("RECALL"))
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?;

    let mut cfg: RecallConfig = settings
      .try_deserialize()
      .context("failed to deserialise RecallConfig")?;
    cfg.store_path = expand_tilde(&cfg.store_path);
    Ok(cfg)
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn temp_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("recall-config-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
  }

  #[test]
  fn reads_toml_file() {
    let path = temp_file(
      "full.toml",
      "store_path = \"/var/lib/recall/reviews.db\"\nfailure_policy = \"due_now\"\n",
    );
    let cfg = RecallConfig::load(&path).unwrap();
    assert_eq!(cfg.store_path, PathBuf::from("/var/lib/recall/reviews.db"));
    assert_eq!(cfg.failure_policy, FailurePolicy::DueNow);
  }

  #[test]
  fn partial_file_falls_back_to_defaults() {
    let path = temp_file("partial.toml", "store_path = \"/tmp/r.db\"\n");
    let cfg = RecallConfig::load(&path).unwrap();
    assert_eq!(cfg.failure_policy, FailurePolicy::NextDay);
  }

  #[test]
  fn unknown_policy_is_an_error() {
    let path = temp_file("bad.toml", "failure_policy = \"sometimes\"\n");
    assert!(RecallConfig::load(&path).is_err());
  }

  #[test]
  fn tilde_expands_against_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(expand_tilde(Path::new("~/x.db")), PathBuf::from(home).join("x.db"));
    assert_eq!(expand_tilde(Path::new("/abs/x.db")), PathBuf::from("/abs/x.db"));
  }
}
