use std::fs;
use std::path::PathBuf;

use crate::app::api;
use crate::app::commands;
use crate::domain::{AppConfig, AppError, Session};

use super::{DocumentArgs, print_typed};

pub(super) fn run_generate(
    config: AppConfig,
    document: &DocumentArgs,
    prompt: &str,
    json: bool,
    export: Option<String>,
    out: Option<PathBuf>,
) -> Result<(), AppError> {
    let request = document.request(prompt)?;
    let format = export.as_deref().map(api::renderable_format).transpose()?;

    let ctx = api::connect(config)?;
    let mut session = Session::new();
    let generated = commands::generate(&ctx, &mut session, &request)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&generated)?);
    } else {
        print_typed(&generated.body, ctx.config().display)?;
    }

    if let Some(format) = format {
        let file = api::export_entry(&ctx, &session, 0, format)?;
        let target = match out {
            Some(path) if path.is_dir() => path.join(&file.file_name),
            Some(path) => path,
            None => std::env::current_dir()?.join(&file.file_name),
        };
        fs::write(&target, &file.bytes)?;
        eprintln!("✅ Exported {} to {}", format, target.display());
    }

    Ok(())
}
