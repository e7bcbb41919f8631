//! Domain models used by the backend: difficulty levels, problem sessions,
//! and submissions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Difficulty of a generated problem. Closed set; keys both the
/// generation prompt band and the scoring weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
  Easy,
  Medium,
  Hard,
}

impl Difficulty {
  /// Points awarded for a correct answer at this level.
  pub fn points(self) -> u32 {
    match self {
      Difficulty::Easy => 10,
      Difficulty::Medium => 20,
      Difficulty::Hard => 30,
    }
  }

  /// Requirements band embedded into the generation prompt.
  pub fn requirements(self) -> &'static str {
    match self {
      Difficulty::Easy => "simple single-step problems with numbers under 20",
      Difficulty::Medium => "two-step problems with numbers under 100",
      Difficulty::Hard => "multi-step problems with larger numbers and more complex scenarios",
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Difficulty::Easy => "easy",
      Difficulty::Medium => "medium",
      Difficulty::Hard => "hard",
    }
  }
}

impl fmt::Display for Difficulty {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Error)]
#[error("not a valid difficulty level")]
pub struct ParseDifficultyError;

impl FromStr for Difficulty {
  type Err = ParseDifficultyError;

  /// Exact lowercase match; anything else is rejected.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "easy" => Ok(Difficulty::Easy),
      "medium" => Ok(Difficulty::Medium),
      "hard" => Ok(Difficulty::Hard),
      _ => Err(ParseDifficultyError),
    }
  }
}

/// One generated problem with its answer key. Write-once; never mutated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProblemSession {
  pub id: String,
  pub problem_text: String,
  pub correct_answer: f64,
  pub difficulty: Difficulty,
}

impl ProblemSession {
  /// Exact numeric equality; no tolerance band.
  #[allow(clippy::float_cmp)]
  pub fn grade(&self, user_answer: f64) -> bool {
    user_answer == self.correct_answer
  }
}

/// One recorded attempt at answering a problem session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Submission {
  pub session_id: String,
  pub user_answer: f64,
  pub is_correct: bool,
  pub feedback_text: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn points_per_level() {
    assert_eq!(Difficulty::Easy.points(), 10);
    assert_eq!(Difficulty::Medium.points(), 20);
    assert_eq!(Difficulty::Hard.points(), 30);
  }

  #[test]
  fn parse_accepts_the_three_levels_only() {
    assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
    assert_eq!("medium".parse::<Difficulty>().unwrap(), Difficulty::Medium);
    assert_eq!("hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);

    assert!("".parse::<Difficulty>().is_err());
    assert!("EASY".parse::<Difficulty>().is_err());
    assert!("extreme".parse::<Difficulty>().is_err());
    assert!(" medium".parse::<Difficulty>().is_err());
  }

  #[test]
  fn serde_uses_lowercase_names() {
    assert_eq!(serde_json::to_string(&Difficulty::Hard).unwrap(), "\"hard\"");
    let d: Difficulty = serde_json::from_str("\"easy\"").unwrap();
    assert_eq!(d, Difficulty::Easy);
  }

  #[test]
  fn grading_is_exact_equality() {
    let session = ProblemSession {
      id: "s1".into(),
      problem_text: "24 - 8 + 12 = ?".into(),
      correct_answer: 28.0,
      difficulty: Difficulty::Medium,
    };
    // "28.0" and "28" parse to the same f64, so both match.
    assert!(session.grade(28.0));
    assert!(session.grade("28".parse().unwrap()));
    assert!(!session.grade(28.000001));
    assert!(!session.grade(27.0));
  }
}
