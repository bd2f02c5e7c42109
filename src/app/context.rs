use crate::domain::AppConfig;
use crate::ports::{TemplateStore, TextGenerator};

/// Application context holding dependencies for command execution.
pub struct AppContext<G: TextGenerator, T: TemplateStore> {
    generator: G,
    templates: T,
    config: AppConfig,
}

impl<G: TextGenerator, T: TemplateStore> AppContext<G, T> {
    /// Create a new application context.
    pub fn new(generator: G, templates: T, config: AppConfig) -> Self {
        Self { generator, templates, config }
    }

    /// Get a reference to the generation client.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Get a reference to the prompt template store.
    pub fn templates(&self) -> &T {
        &self.templates
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
