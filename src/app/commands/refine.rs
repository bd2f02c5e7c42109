use chrono::Utc;

use crate::app::AppContext;
use crate::domain::{
    AppError, DocumentMetadata, DocumentType, GeneratedDocument, GenerationMode,
    RefinementInput, RefinementRequest, Session, ToneType, build_refinement_prompt, clean,
};
use crate::ports::{TemplateStore, TextGenerator};

use super::screen_input;

/// Apply a targeted edit to `current` and return the new version.
///
/// `prior_versions` are earlier bodies, oldest first, excluding `current`.
/// Only the configured history window of them reaches the prompt.
pub fn refine_document<G, T>(
    ctx: &AppContext<G, T>,
    current: &GeneratedDocument,
    instruction: &str,
    doc_type: DocumentType,
    tone: ToneType,
    prior_versions: &[String],
) -> Result<GeneratedDocument, AppError>
where
    G: TextGenerator,
    T: TemplateStore,
{
    let config = ctx.config();
    let input = RefinementInput {
        current_document: &current.body,
        instruction,
        doc_type,
        tone,
        prior_versions,
    };
    input.validate()?;
    screen_input(instruction, &current.metadata.language)?;

    let prompt = build_refinement_prompt(ctx.templates(), &input, &config.document)?;
    let raw = ctx.generator().generate(&prompt, &config.sampling)?;
    let body = validate_refinement(&clean(&raw), current, instruction)?;

    tracing::info!(
        doc_type = doc_type.label(),
        history = input.history_window(config.document.history_window).len(),
        chars = body.chars().count(),
        "refined document"
    );

    Ok(GeneratedDocument {
        body,
        metadata: DocumentMetadata {
            doc_type,
            tone,
            language: current.metadata.language.clone(),
            generated_with: ctx.generator().engine_tag().to_string(),
            generated_at: Utc::now(),
            mode: GenerationMode::Refined,
        },
        history: input.history_window(config.document.history_window).to_vec(),
    })
}

fn validate_refinement(
    body: &str,
    current: &GeneratedDocument,
    instruction: &str,
) -> Result<String, AppError> {
    if body.is_empty() {
        return Err(AppError::EmptyGenerationResult);
    }
    if body.trim().to_lowercase() == instruction.trim().to_lowercase() {
        return Err(AppError::RefinementRejected(
            "the model echoed the instruction instead of an edited document".to_string(),
        ));
    }
    if body == current.body.trim() {
        tracing::warn!("refinement returned the current document unchanged");
    }
    Ok(body.to_string())
}

/// Refine the session's current document and append the result.
pub fn refine<G, T>(
    ctx: &AppContext<G, T>,
    session: &mut Session,
    request: &RefinementRequest,
) -> Result<GeneratedDocument, AppError>
where
    G: TextGenerator,
    T: TemplateStore,
{
    request.validate()?;
    let current = session.latest().ok_or(AppError::EmptyInput { field: "current_document" })?;
    let prior_versions = session.ledger().prior_bodies();

    let document = refine_document(
        ctx,
        current,
        &request.instruction,
        current.metadata.doc_type,
        current.metadata.tone,
        &prior_versions,
    )?;
    session.commit(request.instruction.trim(), document.clone());
    Ok(document)
}
