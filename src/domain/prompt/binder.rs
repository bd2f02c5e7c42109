//! Parameter binding for document generation prompts.

use minijinja::context;

use crate::domain::config::DocumentConfig;
use crate::domain::{AppError, DocumentRequest, DocumentType, ToneType};
use crate::ports::{TemplateSource, TemplateStore};

use super::render::render_template;

const NO_CONTEXT: &str = "None provided";

/// A fully bound instruction ready to send to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalPrompt {
    pub text: String,
    pub doc_type: DocumentType,
    pub tone: ToneType,
    pub language: String,
}

/// Select the template for the request's document type and bind the request into it.
pub fn bind<T: TemplateStore>(
    templates: &T,
    request: &DocumentRequest,
    document: &DocumentConfig,
) -> Result<FinalPrompt, AppError> {
    validate_request(request)?;
    let template = templates.document_template(request.doc_type)?;
    bind_template(&template, &templates.partials(), request, document)
}

/// Bind a request into an already selected template.
pub fn bind_template(
    template: &TemplateSource,
    partials: &[TemplateSource],
    request: &DocumentRequest,
    document: &DocumentConfig,
) -> Result<FinalPrompt, AppError> {
    validate_request(request)?;

    let language = request.language_or(&document.default_language).to_string();
    let additional_context = request
        .additional_context
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(NO_CONTEXT);

    let ctx = context! {
        institution_name => document.institution_name.as_str(),
        doc_noun => request.doc_type.noun(),
        prompt => request.prompt.trim(),
        tone => request.tone.instruction(),
        sender_name => required(&request.sender_name),
        sender_profession => required(&request.sender_profession),
        language => language.as_str(),
        additional_context => additional_context,
    };

    let text = render_template(template, partials, ctx)?;
    tracing::debug!(
        doc_type = request.doc_type.label(),
        tone = request.tone.label(),
        prompt_chars = text.len(),
        "bound generation prompt"
    );

    Ok(FinalPrompt { text, doc_type: request.doc_type, tone: request.tone, language })
}

fn validate_request(request: &DocumentRequest) -> Result<(), AppError> {
    if request.prompt.trim().is_empty() {
        return Err(AppError::MissingRequiredField { field: "prompt" });
    }
    if required(&request.sender_name).is_empty() {
        return Err(AppError::MissingRequiredField { field: "sender_name" });
    }
    if required(&request.sender_profession).is_empty() {
        return Err(AppError::MissingRequiredField { field: "sender_profession" });
    }
    Ok(())
}

fn required(value: &Option<String>) -> &str {
    value.as_deref().map(str::trim).unwrap_or_default()
}
