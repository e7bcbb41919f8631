//! In-process problem store: the session table and the submission table.
//!
//! Presents the same contract the hosted database gave the handlers:
//! session ids are store-assigned, sessions are write-once/read-many, and
//! a submission referencing an unknown session is rejected. Submissions
//! are never read back by the handlers; the table exists for recording.

use std::{collections::HashMap, sync::Arc};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::instrument;
use uuid::Uuid;

use crate::domain::{Difficulty, ProblemSession, Submission};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session {0} already exists")]
    DuplicateSession(String),
    #[error("submission references unknown session {0}")]
    UnknownSession(String),
}

#[derive(Clone, Default)]
pub struct ProblemStore {
    sessions: Arc<RwLock<HashMap<String, ProblemSession>>>,
    submissions: Arc<RwLock<Vec<Submission>>>,
}

impl ProblemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new session row; the id is assigned here and returned.
    #[instrument(level = "debug", skip(self, problem_text))]
    pub async fn create_session(
        &self,
        problem_text: String,
        correct_answer: f64,
        difficulty: Difficulty,
    ) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&id) {
            return Err(StoreError::DuplicateSession(id));
        }
        sessions.insert(
            id.clone(),
            ProblemSession {
                id: id.clone(),
                problem_text,
                correct_answer,
                difficulty,
            },
        );
        Ok(id)
    }

    /// Read-only lookup of a session by id.
    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn get_session(&self, id: &str) -> Option<ProblemSession> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Append a submission row. Rejects unknown session references.
    #[instrument(level = "debug", skip(self, submission), fields(session_id = %submission.session_id))]
    pub async fn record_submission(&self, submission: Submission) -> Result<(), StoreError> {
        if !self
            .sessions
            .read()
            .await
            .contains_key(&submission.session_id)
        {
            return Err(StoreError::UnknownSession(submission.session_id));
        }
        self.submissions.write().await.push(submission);
        Ok(())
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn submission_count(&self) -> usize {
        self.submissions.read().await.len()
    }
}
