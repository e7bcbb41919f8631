//! Client session view: the single-page client's state machine.
//!
//! Pure state over the two endpoints: current phase, active problem,
//! score, streak, and the submission history. No I/O happens here; the
//! caller performs the requests and feeds the results back in. While a
//! request is in flight (Generating/Submitting) the generate and submit
//! actions are rejected, matching the disabled controls in the UI.
//!
//! The history accumulates every attempt; rendering returns only the
//! most recent five, most recent first. All of this state is ephemeral
//! and lost on reload.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::Difficulty;

/// How many history entries the view renders.
const HISTORY_RENDERED: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Generating,
    AwaitingAnswer,
    Submitting,
    ShowingFeedback,
}

/// One attempted problem, as rendered in the history panel.
#[derive(Clone, Debug)]
pub struct HistoryEntry {
    pub problem_text: String,
    pub user_answer: f64,
    pub is_correct: bool,
    pub difficulty: Difficulty,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("a request is already in flight")]
    Busy,
    #[error("no active problem to answer")]
    NoActiveProblem,
    #[error("answer must not be empty")]
    EmptyAnswer,
    #[error("answer is not a number")]
    UnparsableAnswer,
    #[error("transition not allowed in this phase")]
    BadTransition,
}

#[derive(Clone, Debug)]
struct ActiveProblem {
    session_id: String,
    problem_text: String,
    difficulty: Difficulty,
    pending_answer: Option<f64>,
}

pub struct SessionView {
    phase: Phase,
    pending_difficulty: Option<Difficulty>,
    active: Option<ActiveProblem>,
    last_feedback: Option<String>,
    last_correct: Option<bool>,
    score: u32,
    streak: u32,
    history: Vec<HistoryEntry>,
}

impl Default for SessionView {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionView {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            pending_difficulty: None,
            active: None,
            last_feedback: None,
            last_correct: None,
            score: 0,
            streak: 0,
            history: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Total attempts made, regardless of how many are rendered.
    pub fn attempts(&self) -> usize {
        self.history.len()
    }

    /// Feedback from the last graded submission, if any.
    pub fn feedback(&self) -> Option<(bool, &str)> {
        match (self.last_correct, self.last_feedback.as_deref()) {
            (Some(ok), Some(text)) => Some((ok, text)),
            _ => None,
        }
    }

    /// The problem currently on screen, if any: (session id, text).
    pub fn current_problem(&self) -> Option<(&str, &str)> {
        self.active
            .as_ref()
            .map(|a| (a.session_id.as_str(), a.problem_text.as_str()))
    }

    /// Generate action. Allowed from any settled phase.
    pub fn begin_generate(&mut self, difficulty: Difficulty) -> Result<(), ViewError> {
        match self.phase() {
            Phase::Generating | Phase::Submitting => Err(ViewError::Busy),
            _ => {
                self.phase = Phase::Generating;
                self.pending_difficulty = Some(difficulty);
                self.last_feedback = None;
                self.last_correct = None;
                Ok(())
            }
        }
    }

    /// Generation succeeded: show the problem and await an answer.
    pub fn problem_ready(
        &mut self,
        session_id: String,
        problem_text: String,
    ) -> Result<(), ViewError> {
        if self.phase() != Phase::Generating {
            return Err(ViewError::BadTransition);
        }
        let difficulty = self.pending_difficulty.take().unwrap_or(Difficulty::Medium);
        self.active = Some(ActiveProblem {
            session_id,
            problem_text,
            difficulty,
            pending_answer: None,
        });
        self.phase = Phase::AwaitingAnswer;
        Ok(())
    }

    /// Generation failed: back to idle. The caller surfaces the alert.
    pub fn generation_failed(&mut self) -> Result<(), ViewError> {
        if self.phase() != Phase::Generating {
            return Err(ViewError::BadTransition);
        }
        self.pending_difficulty = None;
        self.phase = Phase::Idle;
        Ok(())
    }

    /// Submit action. Requires an active problem and a non-empty numeric
    /// answer; returns the parsed value for the caller to send.
    pub fn begin_submit(&mut self, raw_answer: &str) -> Result<f64, ViewError> {
        match self.phase() {
            Phase::Generating | Phase::Submitting => return Err(ViewError::Busy),
            Phase::AwaitingAnswer | Phase::ShowingFeedback => {}
            Phase::Idle => return Err(ViewError::NoActiveProblem),
        }
        let active = self.active.as_mut().ok_or(ViewError::NoActiveProblem)?;

        let trimmed = raw_answer.trim();
        if trimmed.is_empty() {
            return Err(ViewError::EmptyAnswer);
        }
        let answer: f64 = trimmed.parse().map_err(|_| ViewError::UnparsableAnswer)?;

        active.pending_answer = Some(answer);
        self.phase = Phase::Submitting;
        Ok(answer)
    }

    /// Grading result arrived: update score/streak, record history, show
    /// feedback.
    pub fn feedback_received(
        &mut self,
        is_correct: bool,
        feedback: &str,
        now: DateTime<Utc>,
    ) -> Result<(), ViewError> {
        if self.phase() != Phase::Submitting {
            return Err(ViewError::BadTransition);
        }
        let active = self.active.as_mut().ok_or(ViewError::NoActiveProblem)?;
        let user_answer = active.pending_answer.take().ok_or(ViewError::BadTransition)?;

        if is_correct {
            self.score += active.difficulty.points();
            self.streak += 1;
        } else {
            self.streak = 0;
        }

        // Every submission lands in the history, correct or not.
        self.history.push(HistoryEntry {
            problem_text: active.problem_text.clone(),
            user_answer,
            is_correct,
            difficulty: active.difficulty,
            timestamp: now,
        });

        self.last_feedback = Some(feedback.to_string());
        self.last_correct = Some(is_correct);
        self.phase = Phase::ShowingFeedback;
        Ok(())
    }

    /// Submission failed: stay on the problem so the user can retry.
    pub fn submit_failed(&mut self) -> Result<(), ViewError> {
        if self.phase() != Phase::Submitting {
            return Err(ViewError::BadTransition);
        }
        if let Some(active) = self.active.as_mut() {
            active.pending_answer = None;
        }
        self.phase = Phase::AwaitingAnswer;
        Ok(())
    }

    /// The rendered slice of history: min(N, 5) entries, most recent
    /// first.
    pub fn recent_history(&self) -> Vec<&HistoryEntry> {
        self.history.iter().rev().take(HISTORY_RENDERED).collect()
    }
}
