use std::fs;
use std::path::PathBuf;

use crate::app::api::{self, GeminiContext, SessionSettings};
use crate::app::commands;
use crate::domain::{AppConfig, AppError, Session};

use super::{DocumentArgs, print_typed, prompt_text};

const PREVIEW_CHARS: usize = 60;

/// Slash commands available inside a chat session.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ChatCommand {
    Message(String),
    History,
    Reset,
    Export { format: String, path: Option<PathBuf> },
    Quit,
    Unknown(String),
}

impl ChatCommand {
    fn parse(line: &str) -> Option<ChatCommand> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if !line.starts_with('/') {
            return Some(ChatCommand::Message(line.to_string()));
        }

        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default();
        Some(match command {
            "/history" => ChatCommand::History,
            "/reset" => ChatCommand::Reset,
            "/quit" | "/exit" => ChatCommand::Quit,
            "/export" => ChatCommand::Export {
                format: parts.next().unwrap_or("txt").to_string(),
                path: parts.next().map(PathBuf::from),
            },
            other => ChatCommand::Unknown(other.to_string()),
        })
    }
}

pub(super) fn run_chat(config: AppConfig, document: &DocumentArgs) -> Result<(), AppError> {
    let Some(settings) = resolve_settings(document)? else {
        return Ok(());
    };
    let ctx = api::connect(config)?;
    let mut session = Session::new();

    println!(
        "Drafting a {} ({}). Your first message generates it; later messages refine it.",
        settings.doc_type.label(),
        settings.tone.label()
    );
    println!("Commands: /history, /reset, /export [txt] [path], /quit");

    loop {
        let Some(line) = prompt_text("You", true)? else {
            break;
        };
        let Some(command) = ChatCommand::parse(&line) else {
            continue;
        };

        match command {
            ChatCommand::Quit => break,
            ChatCommand::History => print_history(&session),
            ChatCommand::Reset => {
                session.reset();
                println!("Session cleared. The next message starts a new document.");
            }
            ChatCommand::Export { format, path } => {
                if let Err(e) = export_current(&ctx, &session, &format, path) {
                    eprintln!("Error: {}", e);
                }
            }
            ChatCommand::Unknown(name) => eprintln!("Unknown command: {}", name),
            ChatCommand::Message(message) => {
                match commands::submit(&ctx, &mut session, &message, &settings) {
                    Ok(document) => print_typed(&document.body, ctx.config().display)?,
                    Err(e) if e.is_retryable() => eprintln!("Error: {} Please try again.", e),
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
        }
    }

    Ok(())
}

fn resolve_settings(document: &DocumentArgs) -> Result<Option<SessionSettings>, AppError> {
    let sender_name = match document.sender_name.clone() {
        Some(value) => value,
        None => match prompt_text("Sender name", false)? {
            Some(value) => value,
            None => return Ok(None),
        },
    };
    let sender_profession = match document.sender_profession.clone() {
        Some(value) => value,
        None => match prompt_text("Sender profession", false)? {
            Some(value) => value,
            None => return Ok(None),
        },
    };

    Ok(Some(SessionSettings {
        doc_type: document.doc_type()?,
        tone: document.tone(),
        sender_name,
        sender_profession,
        language: document.language.clone(),
        additional_context: document.context.clone(),
    }))
}

fn print_history(session: &Session) {
    if session.ledger().is_empty() {
        println!("No documents yet.");
        return;
    }
    for (index, document) in session.ledger().all().iter().enumerate() {
        println!(
            "[{}] {} {} {}",
            index,
            document.metadata.mode.as_str(),
            document.metadata.generated_at.format("%H:%M:%S"),
            document.preview(PREVIEW_CHARS).replace('\n', " ")
        );
    }
}

fn export_current(
    ctx: &GeminiContext,
    session: &Session,
    format: &str,
    path: Option<PathBuf>,
) -> Result<(), AppError> {
    let format = api::renderable_format(format)?;
    let index = session.ledger().len().checked_sub(1).ok_or(AppError::LedgerIndexOutOfRange {
        index: 0,
        len: 0,
    })?;
    let file = api::export_entry(ctx, session, index, format)?;
    let target = match path {
        Some(path) if path.is_dir() => path.join(&file.file_name),
        Some(path) => path,
        None => std::env::current_dir()?.join(&file.file_name),
    };
    fs::write(&target, &file.bytes)?;
    println!("✅ Exported version {} to {}", index, target.display());
    Ok(())
}
