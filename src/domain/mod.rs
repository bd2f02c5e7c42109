pub mod config;
pub mod document;
pub mod error;
pub mod guard;
pub mod ledger;
pub mod postprocess;
pub mod prompt;
pub mod session;
pub mod stream;

pub use config::{AppConfig, DisplayConfig, DocumentConfig, GenerationConfig, SamplingConfig};
pub use document::{
    DEFAULT_LANGUAGE, DocumentMetadata, DocumentRequest, DocumentType, GeneratedDocument,
    GenerationMode, MIN_INSTRUCTION_CHARS, RefinementRequest, ToneType,
};
pub use error::AppError;
pub use guard::{OverrideTarget, Screening, screen};
pub use ledger::HistoryLedger;
pub use postprocess::clean;
pub use prompt::{FinalPrompt, RefinementInput, bind, bind_template, build_refinement_prompt};
pub use session::{ChatRole, ChatTurn, Session};
pub use stream::TextChunks;
