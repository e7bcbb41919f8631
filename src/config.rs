//! Loading tutor configuration (prompt templates) from TOML.
//!
//! See `TutorConfig` and `Prompts` for the expected schema.

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct TutorConfig {
  #[serde(default)]
  pub prompts: Prompts,
}

/// Prompt templates used by the model client. Defaults reproduce the
/// built-in Primary 5 tutor behavior; override them in TOML if you need
/// to tune tone/structure.
///
/// Placeholders filled at call time:
///   generation: {difficulty}, {difficulty_upper}, {requirements}
///   feedback:   {problem_text}, {correct_answer}, {user_answer}, {is_correct}
#[derive(Clone, Debug, Deserialize)]
pub struct Prompts {
  pub generation_system: String,
  pub generation_user_template: String,
  pub feedback_system: String,
  pub feedback_user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      generation_system:
        "You are a math word problem generator for Primary 5 students (ages 10-11).".into(),
      generation_user_template: r#"Generate a math word problem suitable for Primary 5 students (ages 10-11).
Difficulty Level: {difficulty_upper}
Requirements: {requirements}

The problem should involve basic arithmetic operations like addition, subtraction, multiplication, or division. Make it engaging and relatable to children.

Return your response as a JSON object with this exact format:
{
  "problem_text": "The word problem text here",
  "final_answer": [numeric answer],
  "difficulty": "{difficulty}"
}

Example:
{
  "problem_text": "Sarah has 24 stickers. She gives 8 stickers to her friend and buys 12 more stickers. How many stickers does Sarah have now?",
  "final_answer": 28,
  "difficulty": "medium"
}

Generate a new, unique problem:"#
        .into(),
      feedback_system:
        "You are a helpful math tutor for Primary 5 students. Provide encouraging and educational feedback.".into(),
      feedback_user_template: r#"Problem: {problem_text}
Correct Answer: {correct_answer}
Student's Answer: {user_answer}
Is Correct: {is_correct}

Provide feedback that:
1. Is encouraging and positive
2. If incorrect, gently explains the mistake and guides toward the correct approach
3. If correct, celebrates the success and maybe offers a challenge
4. Is appropriate for a 10-11 year old
5. Is 2-3 sentences long

Feedback:"#
        .into(),
    }
  }
}

/// Attempt to load `TutorConfig` from TUTOR_CONFIG_PATH. On any parsing/IO
/// error, returns None.
pub fn load_tutor_config_from_env() -> Option<TutorConfig> {
  let path = std::env::var("TUTOR_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<TutorConfig>(&s) {
      Ok(cfg) => {
        info!(target: "mathgen_backend", %path, "Loaded tutor config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "mathgen_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "mathgen_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_templates_carry_their_placeholders() {
    let p = Prompts::default();
    assert!(p.generation_user_template.contains("{difficulty_upper}"));
    assert!(p.generation_user_template.contains("{requirements}"));
    assert!(p.generation_user_template.contains("\"problem_text\""));
    assert!(p.generation_user_template.contains("\"final_answer\""));
    for key in ["{problem_text}", "{correct_answer}", "{user_answer}", "{is_correct}"] {
      assert!(p.feedback_user_template.contains(key), "missing {key}");
    }
  }

  #[test]
  fn toml_prompt_section_replaces_the_defaults() {
    let cfg: TutorConfig = toml::from_str(
      r#"
      [prompts]
      generation_system = "sys"
      generation_user_template = "gen {difficulty}"
      feedback_system = "fb sys"
      feedback_user_template = "fb {is_correct}"
      "#,
    )
    .unwrap();
    assert_eq!(cfg.prompts.generation_system, "sys");
    assert_eq!(cfg.prompts.feedback_user_template, "fb {is_correct}");
  }

  #[test]
  fn empty_toml_falls_back_to_default_prompts() {
    let cfg: TutorConfig = toml::from_str("").unwrap();
    assert_eq!(
      cfg.prompts.generation_system,
      Prompts::default().generation_system
    );
  }
}
