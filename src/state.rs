//! Application state: the quiz registry, built once at startup.
//!
//! Handlers only ever read it, so it is shared as `Arc<AppState>` without locks.

use tracing::{info, instrument};

use crate::catalog::register_builtin;
use crate::config::QuizConfig;
use crate::error::Result;
use crate::registry::Registry;

#[derive(Debug)]
pub struct AppState {
    pub registry: Registry,
}

impl AppState {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// Built-in catalog (unless disabled) followed by the configured quizzes.
    #[instrument(level = "info", skip_all)]
    pub fn from_config(cfg: &QuizConfig) -> Result<Self> {
        let mut registry = Registry::new();
        if cfg.include_builtin {
            register_builtin(&mut registry)?;
        }
        cfg.register_into(&mut registry)?;

        for quiz in registry.quizzes() {
            info!(target: "ezquiz", identifier = %quiz.identifier, categories = ?quiz.category_names(), "Startup quiz inventory");
        }
        Ok(Self::new(registry))
    }
}
