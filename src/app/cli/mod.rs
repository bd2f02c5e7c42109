//! CLI Adapter.

mod chat;
mod generate;

use std::io::{self, ErrorKind, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use dialoguer::{Error as DialoguerError, Input};
use tracing_subscriber::EnvFilter;

use crate::domain::{AppError, DisplayConfig, DocumentRequest, DocumentType, TextChunks, ToneType};

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "DRAFTSMITH_LOG";

#[derive(Parser)]
#[command(name = "draftsmith")]
#[command(version)]
#[command(
    about = "Generate and refine institutional emails with a generative model",
    long_about = None
)]
struct Cli {
    /// Path to a TOML configuration file (defaults to ./draftsmith.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Parameters shared by every document-producing command.
#[derive(Args, Debug, Clone)]
struct DocumentArgs {
    /// Document type (announcement, student-communication, meeting-summary)
    #[arg(short = 't', long = "type", default_value = "announcement")]
    doc_type: String,
    /// Tone (neutral, friendly, firm, formal); unknown values fall back to neutral
    #[arg(long, default_value = "neutral")]
    tone: String,
    /// Sender name used in the signature
    #[arg(long)]
    sender_name: Option<String>,
    /// Sender profession used in the signature
    #[arg(long)]
    sender_profession: Option<String>,
    /// Output language (defaults to the configured language)
    #[arg(short = 'l', long)]
    language: Option<String>,
    /// Additional context for the model
    #[arg(short = 'c', long)]
    context: Option<String>,
}

impl DocumentArgs {
    fn doc_type(&self) -> Result<DocumentType, AppError> {
        self.doc_type.parse()
    }

    fn tone(&self) -> ToneType {
        ToneType::resolve(&self.tone)
    }

    fn request(&self, prompt: &str) -> Result<DocumentRequest, AppError> {
        let mut request = DocumentRequest::new(prompt, self.doc_type()?, self.tone());
        request.sender_name = self.sender_name.clone();
        request.sender_profession = self.sender_profession.clone();
        request.language = self.language.clone();
        request.additional_context = self.context.clone();
        Ok(request)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the bound prompt without calling the model
    #[clap(visible_alias = "p")]
    Prompt {
        #[command(flatten)]
        document: DocumentArgs,
        /// What the email should say
        prompt: String,
    },
    /// Generate one document
    #[clap(visible_alias = "g")]
    Generate {
        #[command(flatten)]
        document: DocumentArgs,
        /// What the email should say
        prompt: String,
        /// Print the document and its metadata as JSON
        #[arg(long)]
        json: bool,
        /// Also export the document; only `txt` renders (pdf and docx are rejected)
        #[arg(long, value_name = "FORMAT")]
        export: Option<String>,
        /// Export destination file or directory
        #[arg(long, requires = "export")]
        out: Option<PathBuf>,
    },
    /// Interactive session: the first message generates, later messages refine
    #[clap(visible_alias = "c")]
    Chat {
        #[command(flatten)]
        document: DocumentArgs,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let _ = dotenvy::dotenv();
    init_tracing();
    let cli = Cli::parse();

    let result: Result<(), AppError> = crate::app::api::load_config(cli.config.as_deref())
        .and_then(|config| match cli.command {
            Commands::Prompt { document, prompt } => run_prompt(config, &document, &prompt),
            Commands::Generate { document, prompt, json, export, out } => {
                generate::run_generate(config, &document, &prompt, json, export, out)
            }
            Commands::Chat { document } => chat::run_chat(config, &document),
        });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run_prompt(
    config: crate::domain::AppConfig,
    document: &DocumentArgs,
    prompt: &str,
) -> Result<(), AppError> {
    let request = document.request(prompt)?;
    let bound = crate::app::api::preview_prompt(config, &request)?;
    println!("{}", bound.text);
    Ok(())
}

/// Write `text` to stdout in chunks, pausing between them.
fn print_typed(text: &str, display: DisplayConfig) -> Result<(), AppError> {
    let mut stdout = io::stdout().lock();
    for chunk in TextChunks::new(text, display.chunk_chars) {
        stdout.write_all(chunk.as_bytes())?;
        stdout.flush()?;
        if display.chunk_delay_ms > 0 {
            thread::sleep(Duration::from_millis(display.chunk_delay_ms));
        }
    }
    writeln!(stdout)?;
    Ok(())
}

/// Ask for a value on the terminal; `None` when the user interrupts.
fn prompt_text(label: &str, allow_empty: bool) -> Result<Option<String>, AppError> {
    match Input::<String>::new().with_prompt(label).allow_empty(allow_empty).interact_text() {
        Ok(value) => Ok(Some(value)),
        Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => Ok(None),
        Err(err) => Err(AppError::Io(io::Error::other(err.to_string()))),
    }
}
