//! Plain-text document export.

use chrono::{DateTime, Utc};

use crate::domain::{AppError, DocumentMetadata, GeneratedDocument};
use crate::ports::{DocumentExporter, ExportFormat};

const RULE_WIDTH: usize = 50;

/// Renders documents as UTF-8 text with a short metadata header.
#[derive(Debug, Clone)]
pub struct PlainTextExporter {
    institution: String,
}

impl PlainTextExporter {
    pub fn new(institution: impl Into<String>) -> Self {
        Self { institution: institution.into() }
    }

    /// Whether `format` has a renderer here; pdf and docx do not.
    pub fn renders(format: ExportFormat) -> bool {
        matches!(format, ExportFormat::Txt)
    }

    fn render(&self, document: &GeneratedDocument) -> String {
        let metadata = &document.metadata;
        let rule = "=".repeat(RULE_WIDTH);
        format!(
            "{} {}\n{}\n\nGenerated on: {}\nTone: {}\n\n{}\n\n{}\n",
            self.institution,
            metadata.doc_type.label(),
            rule,
            metadata.generated_at.format("%Y-%m-%d %H:%M"),
            metadata.tone.label(),
            rule,
            document.body.trim_end(),
        )
    }
}

impl DocumentExporter for PlainTextExporter {
    fn export(
        &self,
        document: &GeneratedDocument,
        format: ExportFormat,
    ) -> Result<Vec<u8>, AppError> {
        if !Self::renders(format) {
            return Err(AppError::UnsupportedExportFormat(format.to_string()));
        }
        Ok(self.render(document).into_bytes())
    }
}

/// Download name for an exported document, e.g. `TUM_announcement_20250301_142500.txt`.
pub fn export_file_name(
    institution: &str,
    metadata: &DocumentMetadata,
    format: ExportFormat,
    now: DateTime<Utc>,
) -> String {
    format!(
        "{}_{}_{}.{}",
        institution.trim().to_uppercase().replace(char::is_whitespace, "_"),
        metadata.doc_type.slug(),
        now.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}
