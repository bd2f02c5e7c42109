use chrono::Utc;

use crate::adapters::export_file_name;
use crate::app::AppContext;
use crate::domain::{AppError, Session};
use crate::ports::{DocumentExporter, ExportFormat, TemplateStore, TextGenerator};

/// Rendered export of one ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Export the ledger entry at `index` (0 is the first version).
pub fn export<G, T, E>(
    ctx: &AppContext<G, T>,
    session: &Session,
    index: usize,
    format: ExportFormat,
    exporter: &E,
) -> Result<ExportedFile, AppError>
where
    G: TextGenerator,
    T: TemplateStore,
    E: DocumentExporter,
{
    let document = session.ledger().get(index)?;
    let bytes = exporter.export(document, format)?;
    let file_name = export_file_name(
        &ctx.config().document.institution,
        &document.metadata,
        format,
        Utc::now(),
    );

    tracing::info!(file = %file_name, bytes = bytes.len(), "exported document");
    Ok(ExportedFile { file_name, mime_type: format.mime_type(), bytes })
}
