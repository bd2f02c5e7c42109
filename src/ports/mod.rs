mod document_exporter;
mod template_store;
mod text_generator;

pub use document_exporter::{DocumentExporter, ExportFormat};
pub use template_store::{TemplateSource, TemplateStore};
pub use text_generator::{GenerationResult, TextGenerator};
