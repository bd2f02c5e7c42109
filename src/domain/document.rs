//! Document request and result models.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// Language used when a request leaves it unset or blank.
pub const DEFAULT_LANGUAGE: &str = "English";

/// Minimum length of a refinement instruction, in characters.
pub const MIN_INSTRUCTION_CHARS: usize = 10;

/// The supported kinds of institutional email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    Announcement,
    #[serde(rename = "Student Communication")]
    StudentCommunication,
    #[serde(rename = "Meeting Summary")]
    MeetingSummary,
}

impl DocumentType {
    /// All document types in menu order.
    pub const ALL: [DocumentType; 3] = [
        DocumentType::Announcement,
        DocumentType::StudentCommunication,
        DocumentType::MeetingSummary,
    ];

    /// Human-readable label, also used as the metadata value.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::Announcement => "Announcement",
            DocumentType::StudentCommunication => "Student Communication",
            DocumentType::MeetingSummary => "Meeting Summary",
        }
    }

    /// Stable identifier used for template file names and export file names.
    pub fn slug(&self) -> &'static str {
        match self {
            DocumentType::Announcement => "announcement",
            DocumentType::StudentCommunication => "student_communication",
            DocumentType::MeetingSummary => "meeting_summary",
        }
    }

    /// Lowercase noun phrase used inside prompt text.
    pub fn noun(&self) -> &'static str {
        match self {
            DocumentType::Announcement => "announcement email",
            DocumentType::StudentCommunication => "student communication email",
            DocumentType::MeetingSummary => "meeting summary email",
        }
    }

    /// Parse a document type from a label, slug, or short alias.
    pub fn from_name(name: &str) -> Option<DocumentType> {
        let normalized: String = name
            .trim()
            .chars()
            .map(|ch| if ch == '-' || ch == ' ' { '_' } else { ch.to_ascii_lowercase() })
            .collect();
        match normalized.as_str() {
            "announcement" | "announce" => Some(DocumentType::Announcement),
            "student_communication" | "studentcommunication" | "student" => {
                Some(DocumentType::StudentCommunication)
            }
            "meeting_summary" | "meetingsummary" | "meeting" | "summary" => {
                Some(DocumentType::MeetingSummary)
            }
            _ => None,
        }
    }
}

impl FromStr for DocumentType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentType::from_name(s).ok_or_else(|| AppError::UnknownDocumentType(s.to_string()))
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Writing tone requested for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToneType {
    #[default]
    Neutral,
    Friendly,
    #[serde(rename = "Firm but polite")]
    Firm,
    Formal,
}

impl ToneType {
    pub const ALL: [ToneType; 4] =
        [ToneType::Neutral, ToneType::Friendly, ToneType::Firm, ToneType::Formal];

    pub fn label(&self) -> &'static str {
        match self {
            ToneType::Neutral => "Neutral",
            ToneType::Friendly => "Friendly",
            ToneType::Firm => "Firm but polite",
            ToneType::Formal => "Formal",
        }
    }

    /// Style guidance injected into templates for this tone.
    pub fn instruction(&self) -> &'static str {
        match self {
            ToneType::Neutral => "Use a balanced, professional tone without emotional undertones.",
            ToneType::Friendly => "Use a warm, approachable tone while maintaining professionalism.",
            ToneType::Firm => "Use a strong, authoritative tone while remaining respectful.",
            ToneType::Formal => {
                "Use a highly formal, official tone suitable for official communications."
            }
        }
    }

    /// Resolve a tone name; anything unrecognized falls back to `Neutral`.
    pub fn resolve(name: &str) -> ToneType {
        match name.trim().to_ascii_lowercase().as_str() {
            "friendly" => ToneType::Friendly,
            "firm" | "firm but polite" | "firm-but-polite" | "firm_but_polite" => ToneType::Firm,
            "formal" => ToneType::Formal,
            _ => ToneType::Neutral,
        }
    }
}

impl fmt::Display for ToneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A request to generate a new document from scratch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRequest {
    pub prompt: String,
    pub doc_type: DocumentType,
    pub tone: ToneType,
    pub additional_context: Option<String>,
    pub sender_name: Option<String>,
    pub sender_profession: Option<String>,
    pub language: Option<String>,
}

impl DocumentRequest {
    pub fn new(prompt: impl Into<String>, doc_type: DocumentType, tone: ToneType) -> Self {
        Self {
            prompt: prompt.into(),
            doc_type,
            tone,
            additional_context: None,
            sender_name: None,
            sender_profession: None,
            language: None,
        }
    }

    pub fn with_sender(mut self, name: impl Into<String>, profession: impl Into<String>) -> Self {
        self.sender_name = Some(name.into());
        self.sender_profession = Some(profession.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.additional_context = Some(context.into());
        self
    }

    /// Requested language, or English when unset or blank.
    pub fn effective_language(&self) -> &str {
        self.language_or(DEFAULT_LANGUAGE)
    }

    /// Requested language, or `fallback` when unset or blank.
    pub fn language_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.language
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(fallback)
    }
}

/// A targeted modification of the most recent document in a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefinementRequest {
    pub instruction: String,
}

impl RefinementRequest {
    pub fn new(instruction: impl Into<String>) -> Self {
        Self { instruction: instruction.into() }
    }

    /// Enforce the blank and minimum-length constraints.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_instruction(&self.instruction)
    }
}

pub(crate) fn validate_instruction(instruction: &str) -> Result<(), AppError> {
    let trimmed = instruction.trim();
    if trimmed.is_empty() {
        return Err(AppError::EmptyInput { field: "instruction" });
    }
    let actual = trimmed.chars().count();
    if actual < MIN_INSTRUCTION_CHARS {
        return Err(AppError::InstructionTooShort { min: MIN_INSTRUCTION_CHARS, actual });
    }
    Ok(())
}

/// How a document version came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    Generated,
    Refined,
}

impl GenerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::Generated => "generated",
            GenerationMode::Refined => "refined",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub doc_type: DocumentType,
    pub tone: ToneType,
    pub language: String,
    pub generated_with: String,
    pub generated_at: DateTime<Utc>,
    pub mode: GenerationMode,
}

impl DocumentMetadata {
    /// Flatten into the string map handed to export collaborators.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert("doc_type".to_string(), self.doc_type.label().to_string());
        map.insert("tone".to_string(), self.tone.label().to_string());
        map.insert("language".to_string(), self.language.clone());
        map.insert("generated_with".to_string(), self.generated_with.clone());
        map.insert(
            "timestamp".to_string(),
            self.generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        );
        map.insert("mode".to_string(), self.mode.as_str().to_string());
        map
    }
}

/// One produced version of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedDocument {
    pub body: String,
    pub metadata: DocumentMetadata,
    /// Prior versions supplied as context when this version was produced.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<String>,
}

impl GeneratedDocument {
    /// First `max_chars` characters of the body, for history listings.
    pub fn preview(&self, max_chars: usize) -> String {
        let mut preview: String = self.body.chars().take(max_chars).collect();
        if self.body.chars().count() > max_chars {
            preview.push_str("...");
        }
        preview
    }
}
