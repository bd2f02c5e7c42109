//! Embedded catalog of prompt templates.
//!
//! Templates are compiled into the binary from `src/assets/templates/` and
//! resolved by their relative path (e.g. `"announcement.j2"`,
//! `"preamble/security.j2"`).

use include_dir::{Dir, DirEntry, include_dir};

use crate::domain::{AppError, DocumentType};
use crate::ports::{TemplateSource, TemplateStore};

static TEMPLATE_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/templates");

const PARTIALS_DIR: &str = "preamble";
const REFINEMENT_TEMPLATE: &str = "refinement.j2";

/// Read a template asset by its relative path.
pub fn read_template_asset(path: &str) -> Option<String> {
    TEMPLATE_DIR.get_file(path).and_then(|file| file.contents_utf8()).map(|s| s.to_string())
}

fn document_template_path(doc_type: DocumentType) -> String {
    format!("{}.j2", doc_type.slug())
}

fn load(path: &str) -> Result<TemplateSource, AppError> {
    read_template_asset(path)
        .map(|content| TemplateSource { name: path.to_string(), content })
        .ok_or_else(|| AppError::TemplateNotFound(path.to_string()))
}

/// Template store backed by the embedded catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplateStore;

impl EmbeddedTemplateStore {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateStore for EmbeddedTemplateStore {
    fn document_template(&self, doc_type: DocumentType) -> Result<TemplateSource, AppError> {
        load(&document_template_path(doc_type))
    }

    fn refinement_template(&self) -> Result<TemplateSource, AppError> {
        load(REFINEMENT_TEMPLATE)
    }

    fn partials(&self) -> Vec<TemplateSource> {
        let mut partials = Vec::new();
        if let Some(dir) = TEMPLATE_DIR.get_dir(PARTIALS_DIR) {
            collect_templates(dir, &mut partials);
        }
        partials.sort_by(|a, b| a.name.cmp(&b.name));
        partials
    }
}

fn collect_templates(dir: &'static Dir, templates: &mut Vec<TemplateSource>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::File(file) => {
                if let Some(content) = file.contents_utf8() {
                    templates.push(TemplateSource {
                        name: file.path().to_string_lossy().replace('\\', "/"),
                        content: content.to_string(),
                    });
                }
            }
            DirEntry::Dir(sub) => collect_templates(sub, templates),
        }
    }
}
