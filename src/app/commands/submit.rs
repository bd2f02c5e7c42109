use crate::app::AppContext;
use crate::domain::{
    AppError, DocumentRequest, DocumentType, GeneratedDocument, RefinementRequest, Session,
    ToneType,
};
use crate::ports::{TemplateStore, TextGenerator};

use super::{generate, refine};

/// Parameters applied to the first message of a chat session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub doc_type: DocumentType,
    pub tone: ToneType,
    pub sender_name: String,
    pub sender_profession: String,
    pub language: Option<String>,
    pub additional_context: Option<String>,
}

impl SessionSettings {
    /// Build a generation request carrying `prompt`.
    pub fn request(&self, prompt: &str) -> DocumentRequest {
        let mut request = DocumentRequest::new(prompt, self.doc_type, self.tone)
            .with_sender(self.sender_name.as_str(), self.sender_profession.as_str());
        request.language = self.language.clone();
        request.additional_context = self.additional_context.clone();
        request
    }
}

/// Route a chat message: the first one generates, later ones refine the current document.
pub fn submit<G, T>(
    ctx: &AppContext<G, T>,
    session: &mut Session,
    message: &str,
    settings: &SessionSettings,
) -> Result<GeneratedDocument, AppError>
where
    G: TextGenerator,
    T: TemplateStore,
{
    if session.latest().is_none() {
        tracing::debug!("no current document, generating");
        generate(ctx, session, &settings.request(message))
    } else {
        tracing::debug!(versions = session.ledger().len(), "current document present, refining");
        refine(ctx, session, &RefinementRequest::new(message))
    }
}
