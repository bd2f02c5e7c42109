//! Pipeline operations over an [`AppContext`](crate::app::AppContext) and a caller-owned session.

mod export;
mod generate;
mod preview;
mod refine;
mod submit;

pub use export::{ExportedFile, export};
pub use generate::{generate, generate_document};
pub use preview::preview_prompt;
pub use refine::{refine, refine_document};
pub use submit::{SessionSettings, submit};

use crate::domain::{AppError, OverrideTarget, screen};

/// Screen user text, refusing policy violations and logging override attempts.
fn screen_input(text: &str, mandated_language: &str) -> Result<(), AppError> {
    let overrides: Vec<OverrideTarget> = screen(text, mandated_language).into_result()?;
    if !overrides.is_empty() {
        let targets: Vec<String> = overrides.iter().map(ToString::to_string).collect();
        tracing::warn!(
            targets = %targets.join(","),
            "request tried to override mandated parameters; serving with mandated values"
        );
    }
    Ok(())
}
