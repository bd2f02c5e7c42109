use crate::domain::{AppError, SamplingConfig};
use crate::ports::{GenerationResult, TextGenerator};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Scripted generator: returns queued results in order and records every prompt it receives.
#[derive(Clone, Default)]
pub struct FakeGenerator {
    pub prompts: Arc<Mutex<Vec<String>>>,
    responses: Arc<Mutex<VecDeque<GenerationResult>>>,
}

impl FakeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replying(texts: &[&str]) -> Self {
        let fake = Self::new();
        for text in texts {
            fake.push_ok(text);
        }
        fake
    }

    pub fn push_ok(&self, text: &str) {
        self.responses.lock().unwrap().push_back(Ok(text.to_string()));
    }

    pub fn push_err(&self, error: AppError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn get_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

impl TextGenerator for FakeGenerator {
    fn generate(&self, prompt: &str, _sampling: &SamplingConfig) -> GenerationResult {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::service("fake generator has no scripted reply", None)))
    }

    fn engine_tag(&self) -> &str {
        "Fake"
    }
}
