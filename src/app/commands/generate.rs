use chrono::Utc;

use crate::app::AppContext;
use crate::domain::{
    AppError, DocumentMetadata, DocumentRequest, GeneratedDocument, GenerationMode, Session, bind,
    clean,
};
use crate::ports::{TemplateStore, TextGenerator};

use super::screen_input;

/// Produce a new document from a request without touching any session.
pub fn generate_document<G, T>(
    ctx: &AppContext<G, T>,
    request: &DocumentRequest,
) -> Result<GeneratedDocument, AppError>
where
    G: TextGenerator,
    T: TemplateStore,
{
    let config = ctx.config();
    let language = request.language_or(&config.document.default_language);

    screen_input(&request.prompt, language)?;
    if let Some(extra) = request.additional_context.as_deref() {
        screen_input(extra, language)?;
    }

    let prompt = bind(ctx.templates(), request, &config.document)?;
    let raw = ctx.generator().generate(&prompt.text, &config.sampling)?;
    let body = clean(&raw);
    if body.is_empty() {
        return Err(AppError::EmptyGenerationResult);
    }

    tracing::info!(
        doc_type = prompt.doc_type.label(),
        tone = prompt.tone.label(),
        chars = body.chars().count(),
        "generated document"
    );

    Ok(GeneratedDocument {
        body,
        metadata: DocumentMetadata {
            doc_type: prompt.doc_type,
            tone: prompt.tone,
            language: prompt.language,
            generated_with: ctx.generator().engine_tag().to_string(),
            generated_at: Utc::now(),
            mode: GenerationMode::Generated,
        },
        history: Vec::new(),
    })
}

/// Generate a document and record it as the session's newest version.
pub fn generate<G, T>(
    ctx: &AppContext<G, T>,
    session: &mut Session,
    request: &DocumentRequest,
) -> Result<GeneratedDocument, AppError>
where
    G: TextGenerator,
    T: TemplateStore,
{
    let document = generate_document(ctx, request)?;
    session.commit(request.prompt.trim(), document.clone());
    Ok(document)
}
