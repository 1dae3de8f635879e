//! Review quality ratings.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A reviewer's self-assessed recall, from 1 (forgot completely) to 5
/// (perfect recall). Ratings of 3 and above count as a qualifying review.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "u8")]
pub struct Quality(u8);

impl Quality {
  pub const MIN: Quality = Quality(1);
  pub const MAX: Quality = Quality(5);
  /// Lowest rating that keeps a card's repetition streak going.
  pub const PASSING: Quality = Quality(3);

  /// Validate a rating collected from a caller. Out-of-range values are
  /// rejected rather than clamped.
  pub fn new(value: i64) -> Result<Self> {
    if (i64::from(Self::MIN.0)..=i64::from(Self::MAX.0)).contains(&value) {
      Ok(Self(value as u8))
    } else {
      Err(Error::InvalidQuality(value))
    }
  }

  /// Clamp an arbitrary integer into `1..=5`, for callers that prefer it to
  /// rejection.
  pub fn clamped(value: i64) -> Self {
    Self(value.clamp(i64::from(Self::MIN.0), i64::from(Self::MAX.0)) as u8)
  }

  pub fn get(self) -> u8 { self.0 }

  pub fn is_passing(self) -> bool { self >= Self::PASSING }
}

impl TryFrom<i64> for Quality {
  type Error = Error;

  fn try_from(value: i64) -> Result<Self> { Self::new(value) }
}

impl From<Quality> for u8 {
  fn from(q: Quality) -> u8 { q.0 }
}

impl FromStr for Quality {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let value: i64 = s
      .trim()
      .parse()
      .map_err(|_| Error::QualityParse(s.to_owned()))?;
    Self::new(value)
  }
}

impl fmt::Display for Quality {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_one_through_five() {
    for n in 1..=5 {
      assert_eq!(Quality::new(n).unwrap().get() as i64, n);
    }
  }

  #[test]
  fn rejects_out_of_range() {
    assert!(matches!(Quality::new(0), Err(Error::InvalidQuality(0))));
    assert!(matches!(Quality::new(6), Err(Error::InvalidQuality(6))));
    assert!(matches!(Quality::new(-3), Err(Error::InvalidQuality(-3))));
  }

  #[test]
  fn clamps_when_asked() {
    assert_eq!(Quality::clamped(-10), Quality::MIN);
    assert_eq!(Quality::clamped(4).get(), 4);
    assert_eq!(Quality::clamped(99), Quality::MAX);
  }

  #[test]
  fn passing_starts_at_three() {
    assert!(!Quality::new(2).unwrap().is_passing());
    assert!(Quality::new(3).unwrap().is_passing());
  }

  #[test]
  fn parses_from_text() {
    assert_eq!(" 4 ".parse::<Quality>().unwrap().get(), 4);
    assert!(matches!("four".parse::<Quality>(), Err(Error::QualityParse(_))));
    assert!(matches!("9".parse::<Quality>(), Err(Error::InvalidQuality(9))));
  }

  #[test]
  fn serde_validates() {
    let q: Quality = serde_json::from_str("5").unwrap();
    assert_eq!(q, Quality::MAX);
    assert!(serde_json::from_str::<Quality>("7").is_err());
    assert_eq!(serde_json::to_string(&q).unwrap(), "5");
  }
}
