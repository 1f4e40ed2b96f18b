use std::sync::Arc;

use services::{QuizConfig, QuizHandle, QuizRunner};

pub trait UiApp: Send + Sync {
    fn quiz_runner(&self) -> QuizRunner;
}

#[derive(Clone)]
pub struct AppContext {
    runner: QuizRunner,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            runner: app.quiz_runner(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &QuizConfig {
        self.runner.config()
    }

    /// Spawn a fresh session. Must run inside the desktop runtime.
    #[must_use]
    pub fn spawn_quiz(&self) -> QuizHandle {
        self.runner.spawn()
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
