use std::sync::Arc;

use services::GenerationService;

/// UI-facing surface of the composed application.
pub trait UiApp: Send + Sync {
    fn app_name(&self) -> String;

    fn generation(&self) -> Arc<GenerationService>;
}

#[derive(Clone)]
pub struct AppContext {
    app_name: String,
    generation: Arc<GenerationService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            app_name: app.app_name(),
            generation: app.generation(),
        }
    }

    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    #[must_use]
    pub fn generation(&self) -> Arc<GenerationService> {
        Arc::clone(&self.generation)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
