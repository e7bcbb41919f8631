//! Minimal OpenAI-compatible client for our two use-cases.
//!
//! We only call chat.completions and request plain text; the problem
//! payload is pulled out of the reply by `extract`. Calls are instrumented
//! and log model names, latencies, and response sizes (not contents).
//!
//! NOTE: We never log the API key and we keep payload truncations short.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::config::Prompts;
use crate::domain::Difficulty;
use crate::util::fill_template;

#[derive(Clone)]
pub struct ModelClient {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub fast_model: String,
  pub strong_model: String,
}

impl ModelClient {
  /// Construct the client if we find OPENAI_API_KEY; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("OPENAI_API_KEY").ok()?;
    let base_url =
      std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
    let fast_model =
      std::env::var("OPENAI_FAST_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
    let strong_model =
      std::env::var("OPENAI_STRONG_MODEL").unwrap_or_else(|_| "gpt-4o".into());

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(20))
      .build()
      .ok()?;

    Some(Self { client, api_key, base_url, fast_model, strong_model })
  }

  /// Plain-text chat completion. One attempt, no retry.
  #[instrument(level = "info", skip(self, system, user), fields(model = %model))]
  async fn chat_plain(
    &self,
    model: &str,
    system: &str,
    user: &str,
    temperature: f32,
  ) -> Result<String, String> {
    let url = format!("{}/chat/completions", self.base_url);
    let req = ChatCompletionRequest {
      model: model.to_string(),
      messages: vec![
        ChatMessageReq { role: "system".into(), content: system.into() },
        ChatMessageReq { role: "user".into(), content: user.into() },
      ],
      temperature,
      max_tokens: None,
    };

    let res = self.client.post(&url)
      .header(USER_AGENT, "mathgen-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req).send().await.map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_provider_error(&body).unwrap_or(body);
      return Err(format!("provider HTTP {}: {}", status, msg));
    }

    let body: ChatCompletionResponse = res.json().await.map_err(|e| e.to_string())?;
    if let Some(usage) = &body.usage {
      info!(prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, "provider usage");
    }
    let text = body.choices.first()
      .and_then(|c| c.message.content.clone())
      .unwrap_or_default().trim().to_string();

    Ok(text)
  }

  // --- High-level helpers (domain-specialized) ---

  /// One-shot problem generation. Returns the raw reply text; the caller
  /// extracts and validates the JSON payload.
  #[instrument(
    level = "info",
    skip(self, prompts),
    fields(%difficulty, model = %self.strong_model)
  )]
  pub async fn generate_problem_raw(
    &self,
    prompts: &Prompts,
    difficulty: Difficulty,
  ) -> Result<String, String> {
    let upper = difficulty.as_str().to_uppercase();
    let user = fill_template(
      &prompts.generation_user_template,
      &[
        ("difficulty", difficulty.as_str()),
        ("difficulty_upper", &upper),
        ("requirements", difficulty.requirements()),
      ],
    );

    let start = std::time::Instant::now();
    let result = self
      .chat_plain(&self.strong_model, &prompts.generation_system, &user, 0.9)
      .await;
    let elapsed = start.elapsed();

    match &result {
      Ok(text) => info!(?elapsed, reply_len = text.len(), "Model reply received"),
      Err(e) => error!(?elapsed, error = %e, "Model call failed during problem generation"),
    }
    result
  }

  /// Prose feedback for a graded submission. The reply is used verbatim
  /// (trimmed) as feedback text.
  #[instrument(
    level = "info",
    skip(self, prompts, problem_text),
    fields(model = %self.fast_model, %is_correct, problem_len = problem_text.len())
  )]
  pub async fn feedback(
    &self,
    prompts: &Prompts,
    problem_text: &str,
    correct_answer: f64,
    user_answer: f64,
    is_correct: bool,
  ) -> Result<String, String> {
    let correct_answer = correct_answer.to_string();
    let user_answer = user_answer.to_string();
    let user = fill_template(
      &prompts.feedback_user_template,
      &[
        ("problem_text", problem_text),
        ("correct_answer", &correct_answer),
        ("user_answer", &user_answer),
        ("is_correct", if is_correct { "true" } else { "false" }),
      ],
    );
    self
      .chat_plain(&self.fast_model, &prompts.feedback_system, &user, 0.7)
      .await
  }
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest {
  model: String,
  messages: Vec<ChatMessageReq>,
  temperature: f32,
  #[serde(skip_serializing_if = "Option::is_none")]
  max_tokens: Option<u32>,
}
#[derive(Serialize)]
struct ChatMessageReq { role: String, content: String }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
  #[serde(default)] total_tokens: Option<u32>,
}

/// Try to extract a clean error message from a provider error body.
fn extract_provider_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  match serde_json::from_str::<EWrap>(body) {
    Ok(w) => Some(w.error.message),
    Err(_) => None,
  }
}
