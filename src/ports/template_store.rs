use crate::domain::{AppError, DocumentType};

/// A named template source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    /// Name used for `{% include %}` resolution and error messages.
    pub name: String,
    /// Template text with `{{ placeholder }}` markers.
    pub content: String,
}

/// Port for accessing prompt templates.
pub trait TemplateStore {
    /// Get the instruction template for a document type.
    fn document_template(&self, doc_type: DocumentType) -> Result<TemplateSource, AppError>;

    /// Get the template used to build refinement prompts.
    fn refinement_template(&self) -> Result<TemplateSource, AppError>;

    /// Shared fragments (identity, security, language preambles) templates may include.
    fn partials(&self) -> Vec<TemplateSource>;

    /// Get the instruction template for a document type given by name.
    fn template_for_name(&self, name: &str) -> Result<TemplateSource, AppError> {
        let doc_type: DocumentType = name.parse()?;
        self.document_template(doc_type)
    }
}
