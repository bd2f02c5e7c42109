mod fake_generator;

use chrono::{TimeZone, Utc};

use crate::adapters::catalogs::EmbeddedTemplateStore;
use crate::app::AppContext;
use crate::domain::{
    AppConfig, DocumentMetadata, DocumentRequest, DocumentType, GeneratedDocument,
    GenerationMode, ToneType,
};

pub use fake_generator::FakeGenerator;

/// A generated announcement with fixed metadata and the given body.
pub fn document(body: &str) -> GeneratedDocument {
    GeneratedDocument {
        body: body.to_string(),
        metadata: DocumentMetadata {
            doc_type: DocumentType::Announcement,
            tone: ToneType::Neutral,
            language: "English".to_string(),
            generated_with: "Fake".to_string(),
            generated_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
            mode: GenerationMode::Generated,
        },
        history: Vec::new(),
    }
}

/// A complete, valid request for the given type and tone.
pub fn request(prompt: &str, doc_type: DocumentType, tone: ToneType) -> DocumentRequest {
    DocumentRequest::new(prompt, doc_type, tone).with_sender("Anna Schmidt", "Dean of Studies")
}

pub fn context(generator: &FakeGenerator) -> AppContext<FakeGenerator, EmbeddedTemplateStore> {
    AppContext::new(generator.clone(), EmbeddedTemplateStore::new(), AppConfig::default())
}
