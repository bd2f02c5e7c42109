//! Generative text service port definition.

use crate::domain::{AppError, SamplingConfig};

/// Outcome of one generation call: the model's text, or the reason there is none.
pub type GenerationResult = Result<String, AppError>;

/// Port for generative text services.
pub trait TextGenerator {
    /// Send a single prompt and return the completion text.
    ///
    /// Implementations return `AppError::EmptyGenerationResult` when the service
    /// answers without text, and `AppError::GenerationService` for transport,
    /// authentication, quota, or payload failures.
    fn generate(&self, prompt: &str, sampling: &SamplingConfig) -> GenerationResult;

    /// Tag recorded in document metadata.
    fn engine_tag(&self) -> &str;
}

impl<G: TextGenerator + ?Sized> TextGenerator for Box<G> {
    fn generate(&self, prompt: &str, sampling: &SamplingConfig) -> GenerationResult {
        (**self).generate(prompt, sampling)
    }

    fn engine_tag(&self) -> &str {
        (**self).engine_tag()
    }
}
