//! Refinement prompt construction.

use minijinja::context;

use crate::domain::config::DocumentConfig;
use crate::domain::document::validate_instruction;
use crate::domain::{AppError, DocumentType, ToneType};
use crate::ports::TemplateStore;

use super::render::render_template;

/// Inputs of one targeted edit.
#[derive(Debug, Clone, Copy)]
pub struct RefinementInput<'a> {
    pub current_document: &'a str,
    pub instruction: &'a str,
    pub doc_type: DocumentType,
    pub tone: ToneType,
    /// Earlier versions, oldest first. Only the most recent few are embedded.
    pub prior_versions: &'a [String],
}

impl RefinementInput<'_> {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.current_document.trim().is_empty() {
            return Err(AppError::EmptyInput { field: "current_document" });
        }
        validate_instruction(self.instruction)
    }

    /// The trailing `window` prior versions.
    pub fn history_window(&self, window: usize) -> &[String] {
        let start = self.prior_versions.len().saturating_sub(window);
        &self.prior_versions[start..]
    }
}

/// Build the refinement instruction for the model.
pub fn build_refinement_prompt<T: TemplateStore>(
    templates: &T,
    input: &RefinementInput<'_>,
    document: &DocumentConfig,
) -> Result<String, AppError> {
    input.validate()?;

    let template = templates.refinement_template()?;
    let prior_versions = input.history_window(document.history_window);
    let ctx = context! {
        institution_name => document.institution_name.as_str(),
        doc_noun => input.doc_type.noun(),
        doc_type => input.doc_type.label(),
        tone => input.tone.instruction(),
        current_document => input.current_document.trim(),
        instruction => input.instruction.trim(),
        prior_versions => prior_versions,
    };

    let text = render_template(&template, &templates.partials(), ctx)?;
    tracing::debug!(
        doc_type = input.doc_type.label(),
        history = prior_versions.len(),
        prompt_chars = text.len(),
        "bound refinement prompt"
    );
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::catalogs::EmbeddedTemplateStore;

    const CURRENT: &str = "Subject: Library closes early\n\nDear students,\n\nThe library closes at 14:00 on Friday, 28 February.\n\nKind regards,\nA. Schmidt\nDean";
    const INSTRUCTION: &str = "change the closing date to March 5";

    fn input(prior: &[String]) -> RefinementInput<'_> {
        RefinementInput {
            current_document: CURRENT,
            instruction: INSTRUCTION,
            doc_type: DocumentType::Announcement,
            tone: ToneType::Formal,
            prior_versions: prior,
        }
    }

    #[test]
    fn embeds_document_and_instruction_verbatim() {
        let store = EmbeddedTemplateStore::new();
        let prompt =
            build_refinement_prompt(&store, &input(&[]), &DocumentConfig::default()).unwrap();
        assert!(prompt.contains(CURRENT));
        assert!(prompt.contains(INSTRUCTION));
        assert!(prompt.contains("apply ONLY the requested changes"));
        assert!(prompt.contains("Preserve dates, names, and links"));
        assert!(prompt.contains("Never output code"));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn empty_history_omits_the_history_block() {
        let store = EmbeddedTemplateStore::new();
        let prompt =
            build_refinement_prompt(&store, &input(&[]), &DocumentConfig::default()).unwrap();
        assert!(!prompt.contains("Previous Document Versions"));
    }

    #[test]
    fn history_is_limited_to_the_last_three_versions() {
        let prior: Vec<String> = (1..=5).map(|n| format!("version body {n}")).collect();
        let prompt = build_refinement_prompt(
            &EmbeddedTemplateStore::new(),
            &input(&prior),
            &DocumentConfig::default(),
        )
        .unwrap();

        assert!(prompt.contains("Previous Document Versions"));
        assert!(!prompt.contains("version body 1"));
        assert!(!prompt.contains("version body 2"));
        assert!(prompt.contains("[1] version body 3"));
        assert!(prompt.contains("[3] version body 5"));
    }

    #[test]
    fn whitespace_instruction_is_empty_input() {
        let mut refinement = input(&[]);
        refinement.instruction = "   \n";
        let err = build_refinement_prompt(
            &EmbeddedTemplateStore::new(),
            &refinement,
            &DocumentConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::EmptyInput { field: "instruction" }));
    }

    #[test]
    fn blank_current_document_is_empty_input() {
        let mut refinement = input(&[]);
        refinement.current_document = "";
        let err = refinement.validate().unwrap_err();
        assert!(matches!(err, AppError::EmptyInput { field: "current_document" }));
    }
}
