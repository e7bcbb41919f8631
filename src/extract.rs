//! Fail-closed extraction of the problem payload from a free-text model
//! reply.
//!
//! The model is instructed to emit a single JSON object, but replies may
//! wrap it in prose or code fences. We take the brace-delimited substring,
//! parse it as a JSON object, and validate the required fields. Anything
//! short of that is rejected; there is no partial recovery.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::domain::Difficulty;

lazy_static! {
  // First `{` through last `}`, across newlines.
  static ref JSON_OBJECT: Regex = Regex::new(r"(?s)\{.*\}").unwrap();
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
  #[error("no JSON object found in model reply")]
  NoJsonObject,
  #[error("JSON parse failed: {0}")]
  Parse(String),
  #[error("field {0:?} is missing or has the wrong type")]
  BadField(&'static str),
}

/// Validated payload extracted from a model reply.
#[derive(Clone, Debug)]
pub struct GeneratedProblem {
  pub problem_text: String,
  pub final_answer: f64,
  /// Difficulty echoed by the model, when it names a valid level.
  pub difficulty: Option<Difficulty>,
}

/// Extract and validate the generated problem from `raw`.
///
/// Requirements: `problem_text` is a non-empty string, `final_answer` is
/// numeric. The `difficulty` echo is optional and ignored unless it names
/// one of the known levels.
pub fn extract_problem(raw: &str) -> Result<GeneratedProblem, ExtractError> {
  let candidate = JSON_OBJECT
    .find(raw)
    .ok_or(ExtractError::NoJsonObject)?
    .as_str();

  let value: Value =
    serde_json::from_str(candidate).map_err(|e| ExtractError::Parse(e.to_string()))?;
  let obj = value.as_object().ok_or(ExtractError::NoJsonObject)?;

  let problem_text = obj
    .get("problem_text")
    .and_then(Value::as_str)
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .ok_or(ExtractError::BadField("problem_text"))?
    .to_string();

  let final_answer = obj
    .get("final_answer")
    .and_then(Value::as_f64)
    .ok_or(ExtractError::BadField("final_answer"))?;

  let difficulty = obj
    .get("difficulty")
    .and_then(Value::as_str)
    .and_then(|s| s.parse::<Difficulty>().ok());

  Ok(GeneratedProblem {
    problem_text,
    final_answer,
    difficulty,
  })
}
