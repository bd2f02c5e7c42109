//! Per-user interactive session state.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{GeneratedDocument, HistoryLedger};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One message exchanged in the session's chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
    pub at: DateTime<Utc>,
}

/// Session state owned by the caller and passed to every pipeline call.
#[derive(Debug, Clone, Default)]
pub struct Session {
    ledger: HistoryLedger,
    turns: Vec<ChatTurn>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ledger(&self) -> &HistoryLedger {
        &self.ledger
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Current document, if any.
    pub fn latest(&self) -> Option<&GeneratedDocument> {
        self.ledger.latest()
    }

    /// Commit a completed exchange: the user message, the assistant reply, and the new version.
    pub(crate) fn commit(&mut self, user_message: &str, document: GeneratedDocument) {
        let now = Utc::now();
        self.turns.push(ChatTurn {
            role: ChatRole::User,
            content: user_message.to_string(),
            at: now,
        });
        self.turns.push(ChatTurn {
            role: ChatRole::Assistant,
            content: document.body.clone(),
            at: now,
        });
        self.ledger.append(document);
    }

    /// Drop all history; the next message starts a fresh document.
    pub fn reset(&mut self) {
        self.ledger.clear();
        self.turns.clear();
    }
}
