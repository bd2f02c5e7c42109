pub mod catalogs;
pub mod gemini;
pub mod text_exporter;

pub use self::catalogs::EmbeddedTemplateStore;
pub use self::gemini::{HttpGeminiClient, RetryPolicy, RetryingGenerator};
pub use self::text_exporter::{PlainTextExporter, export_file_name};
