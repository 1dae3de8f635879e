//! Card-id lists supplied by the content catalog.
//!
//! A catalog file holds one card id per line. Blank lines and lines starting
//! with `#` are skipped; surrounding whitespace is trimmed.

use std::path::Path;

use anyhow::Context as _;

pub fn parse(text: &str) -> Vec<String> {
  text
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty() && !line.starts_with('#'))
    .map(str::to_owned)
    .collect()
}

pub fn read(path: &Path) -> anyhow::Result<Vec<String>> {
  let text = std::fs::read_to_string(path)
    .with_context(|| format!("reading catalog {}", path.display()))?;
  Ok(parse(&text))
}

/// Ids given on the command line followed by those in the catalog file.
pub fn collect(ids: Vec<String>, catalog: Option<&Path>) -> anyhow::Result<Vec<String>> {
  let mut all = ids;
  if let Some(path) = catalog {
    all.extend(read(path)?);
  }
  Ok(all)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn skips_blank_lines_and_comments() {
    let text = "# rust\nownership\n\n  lifetimes  \n#tcp\ntcp-handshake\n";
    assert_eq!(parse(text), ["ownership", "lifetimes", "tcp-handshake"]);
  }

  #[test]
  fn arguments_come_first() {
    let ids = collect(vec!["a".into()], None).unwrap();
    assert_eq!(ids, ["a"]);
  }

  #[test]
  fn missing_catalog_is_an_error() {
    let err = collect(vec![], Some(Path::new("/definitely/not/here.txt"))).unwrap_err();
    assert!(err.to_string().contains("reading catalog"));
  }
}
