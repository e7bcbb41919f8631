//! Core behaviors behind the two endpoints.
//!
//! Each request performs at most one model call plus one store read and
//! one store write, strictly in sequence. Nothing here retries: the model
//! is called exactly once per request, and a store failure after a
//! successful model call loses the generated content.

use tracing::{info, instrument};

use crate::domain::{Difficulty, Submission};
use crate::error::ApiError;
use crate::extract;
use crate::protocol::{AnswerOut, ProblemOut, PublicProblem};
use crate::state::AppState;
use crate::util::trunc_for_log;

/// Resolve the requested difficulty: absent defaults to medium; an
/// explicit null or out-of-set string is rejected.
fn resolve_difficulty(requested: Option<Option<String>>) -> Result<Difficulty, ApiError> {
  match requested {
    None => Ok(Difficulty::Medium),
    Some(None) => Err(ApiError::InvalidDifficulty("null".into())),
    Some(Some(s)) => s
      .parse::<Difficulty>()
      .map_err(|_| ApiError::InvalidDifficulty(s)),
  }
}

#[instrument(level = "info", skip(state))]
pub async fn generate_problem(
  state: &AppState,
  requested: Option<Option<String>>,
) -> Result<ProblemOut, ApiError> {
  let difficulty = resolve_difficulty(requested)?;

  let model = state
    .model
    .as_ref()
    .ok_or_else(|| ApiError::Provider("model provider not configured".into()))?;
  let raw = model
    .generate_problem_raw(&state.prompts, difficulty)
    .await
    .map_err(ApiError::Provider)?;

  let generated = extract::extract_problem(&raw)?;

  // Store the difficulty the model echoed when it names a valid level,
  // otherwise the requested one.
  let stored_difficulty = generated.difficulty.unwrap_or(difficulty);

  let session_id = state
    .store
    .create_session(
      generated.problem_text.clone(),
      generated.final_answer,
      stored_difficulty,
    )
    .await?;

  info!(
    target: "problem",
    %session_id,
    difficulty = %stored_difficulty,
    problem_preview = %trunc_for_log(&generated.problem_text, 60),
    "Problem generated and stored"
  );

  Ok(ProblemOut {
    success: true,
    problem: PublicProblem {
      problem_text: generated.problem_text,
      final_answer: generated.final_answer,
    },
    session_id,
  })
}

#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn submit_answer(
  state: &AppState,
  session_id: &str,
  user_answer: f64,
) -> Result<AnswerOut, ApiError> {
  let session = state
    .store
    .get_session(session_id)
    .await
    .ok_or_else(|| ApiError::SessionNotFound(session_id.to_string()))?;

  let is_correct = session.grade(user_answer);

  let model = state
    .model
    .as_ref()
    .ok_or_else(|| ApiError::Provider("model provider not configured".into()))?;
  let feedback = model
    .feedback(
      &state.prompts,
      &session.problem_text,
      session.correct_answer,
      user_answer,
      is_correct,
    )
    .await
    .map_err(ApiError::Provider)?;
  let feedback = feedback.trim().to_string();

  state
    .store
    .record_submission(Submission {
      session_id: session.id.clone(),
      user_answer,
      is_correct,
      feedback_text: feedback.clone(),
    })
    .await?;

  info!(target: "problem", id = %session.id, %is_correct, "Answer graded and recorded");

  Ok(AnswerOut {
    success: true,
    is_correct,
    feedback,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn absent_difficulty_defaults_to_medium() {
    assert_eq!(resolve_difficulty(None).unwrap(), Difficulty::Medium);
  }

  #[test]
  fn explicit_null_is_rejected() {
    let err = resolve_difficulty(Some(None)).unwrap_err();
    assert!(matches!(err, ApiError::InvalidDifficulty(_)));
  }

  #[test]
  fn out_of_set_values_are_rejected() {
    for bad in ["", "EASY", "extreme", "medium "] {
      let err = resolve_difficulty(Some(Some(bad.to_string()))).unwrap_err();
      assert!(matches!(err, ApiError::InvalidDifficulty(v) if v == bad));
    }
  }

  #[test]
  fn valid_levels_resolve() {
    assert_eq!(
      resolve_difficulty(Some(Some("easy".into()))).unwrap(),
      Difficulty::Easy
    );
    assert_eq!(
      resolve_difficulty(Some(Some("hard".into()))).unwrap(),
      Difficulty::Hard
    );
  }
}
