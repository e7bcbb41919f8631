//! API error taxonomy and its wire mapping.
//!
//! Only a bad difficulty value is the caller's mistake and gets a
//! distinguishing 400. Everything else collapses to a generic 500 body,
//! but each failure kind keeps a distinct machine-readable `code` so
//! operators and tests can tell them apart.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::extract::ExtractError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
  #[error("invalid difficulty level: {0:?}")]
  InvalidDifficulty(String),

  #[error("malformed model output: {0}")]
  MalformedModelOutput(#[from] ExtractError),

  #[error("unknown session id: {0}")]
  SessionNotFound(String),

  #[error("store write failed: {0}")]
  StoreWrite(#[from] StoreError),

  #[error("model provider call failed: {0}")]
  Provider(String),
}

impl ApiError {
  pub fn code(&self) -> &'static str {
    match self {
      ApiError::InvalidDifficulty(_) => "invalid_difficulty",
      ApiError::MalformedModelOutput(_) => "malformed_model_output",
      ApiError::SessionNotFound(_) => "session_not_found",
      ApiError::StoreWrite(_) => "store_write_failed",
      ApiError::Provider(_) => "provider_failure",
    }
  }

  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::InvalidDifficulty(_) => StatusCode::BAD_REQUEST,
      _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn message(&self) -> &'static str {
    match self {
      ApiError::InvalidDifficulty(_) => "Invalid difficulty level",
      _ => "Internal server error",
    }
  }
}

/// Wire body for every failure response.
#[derive(Serialize)]
struct ErrorBody {
  error: &'static str,
  code: &'static str,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    // Full detail stays server-side; the body carries only the generic
    // message plus the taxonomy code.
    tracing::error!(target: "mathgen_backend", code = self.code(), error = %self, "request failed");
    let body = Json(ErrorBody { error: self.message(), code: self.code() });
    (self.status(), body).into_response()
  }
}
