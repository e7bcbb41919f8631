use std::sync::Arc;

use axum::Router;
use mathgen_backend::config::Prompts;
use mathgen_backend::routes::build_router;
use mathgen_backend::state::AppState;
use mathgen_backend::store::ProblemStore;

/// Router plus a handle on the state so tests can inspect the store.
/// The model client is absent: provider-dependent paths fail with 500,
/// which keeps these tests deterministic and offline.
pub fn create_test_app() -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::with_parts(
        ProblemStore::new(),
        None,
        Prompts::default(),
    ));
    (build_router(state.clone()), state)
}
