//! Application state: problem store, prompts, and optional model client.

use tracing::{info, instrument};

use crate::config::{load_tutor_config_from_env, Prompts};
use crate::llm::ModelClient;
use crate::store::ProblemStore;

#[derive(Clone)]
pub struct AppState {
    pub store: ProblemStore,
    pub model: Option<ModelClient>,
    pub prompts: Prompts,
}

impl AppState {
    /// Build state from env: load config, init the store, init the model
    /// client.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let prompts = load_tutor_config_from_env()
            .map(|c| c.prompts)
            .unwrap_or_default();

        let model = ModelClient::from_env();
        if let Some(m) = &model {
            info!(target: "mathgen_backend", base_url = %m.base_url, fast_model = %m.fast_model, strong_model = %m.strong_model, "Model provider enabled.");
        } else {
            info!(target: "mathgen_backend", "Model provider disabled (no OPENAI_API_KEY). Generation and feedback will fail.");
        }

        Self {
            store: ProblemStore::new(),
            model,
            prompts,
        }
    }

    /// State from explicit parts; used by tests that must not touch env.
    pub fn with_parts(store: ProblemStore, model: Option<ModelClient>, prompts: Prompts) -> Self {
        Self {
            store,
            model,
            prompts,
        }
    }
}
