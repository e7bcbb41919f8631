//! HTTP endpoint handlers. These are thin wrappers that forward to core
//! logic; all error mapping happens in `ApiError::into_response`.

use std::sync::Arc;
use axum::{extract::State, Json};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::logic;
use crate::protocol::{AnswerIn, AnswerOut, HealthOut, ProblemIn, ProblemOut};
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> Json<HealthOut> {
  Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_problem(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ProblemIn>,
) -> Result<Json<ProblemOut>, ApiError> {
  let out = logic::generate_problem(&state, body.difficulty).await?;
  info!(target: "problem", session_id = %out.session_id, "HTTP problem served");
  Ok(Json(out))
}

#[instrument(level = "info", skip(state, body), fields(session_id = %body.session_id))]
pub async fn http_post_answer(
  State(state): State<Arc<AppState>>,
  Json(body): Json<AnswerIn>,
) -> Result<Json<AnswerOut>, ApiError> {
  let out = logic::submit_answer(&state, &body.session_id, body.user_answer).await?;
  info!(target: "problem", session_id = %body.session_id, is_correct = %out.is_correct, "HTTP answer graded");
  Ok(Json(out))
}
