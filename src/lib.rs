//! draftsmith: generate and refine institutional emails with a generative language model.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::AppContext;
pub use app::api::{GeminiContext, connect, export_entry, load_config, preview_prompt};
pub use app::commands::{
    ExportedFile, SessionSettings, export, generate, generate_document, refine, refine_document,
    submit,
};
pub use domain::{
    AppConfig, AppError, DocumentRequest, DocumentType, GeneratedDocument, RefinementRequest,
    Session, ToneType,
};
