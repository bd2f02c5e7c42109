//! Append-only record of document versions produced in a session.

use crate::domain::{AppError, GeneratedDocument};

/// Ordered history of produced documents; the last entry is the current document.
#[derive(Debug, Clone, Default)]
pub struct HistoryLedger {
    entries: Vec<GeneratedDocument>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, document: GeneratedDocument) {
        self.entries.push(document);
    }

    /// The current document, or `None` before the first generation.
    pub fn latest(&self) -> Option<&GeneratedDocument> {
        self.entries.last()
    }

    pub fn all(&self) -> &[GeneratedDocument] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Result<&GeneratedDocument, AppError> {
        self.entries
            .get(index)
            .ok_or(AppError::LedgerIndexOutOfRange { index, len: self.entries.len() })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Bodies of the versions preceding the current one, oldest first.
    pub fn prior_bodies(&self) -> Vec<String> {
        match self.entries.split_last() {
            Some((_, earlier)) => earlier.iter().map(|doc| doc.body.clone()).collect(),
            None => Vec::new(),
        }
    }
}
