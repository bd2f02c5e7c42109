//! Configuration file loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppConfig, AppError};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "draftsmith.toml";

/// Load configuration from `path`, or from `draftsmith.toml` in the current
/// directory when present. Falls back to defaults when neither exists.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, AppError> {
    let resolved: Option<PathBuf> = match path {
        Some(explicit) => {
            if !explicit.exists() {
                return Err(AppError::InvalidConfig(format!(
                    "config file not found: {}",
                    explicit.display()
                )));
            }
            Some(explicit.to_path_buf())
        }
        None => {
            let candidate = std::env::current_dir()?.join(DEFAULT_CONFIG_FILE);
            candidate.exists().then_some(candidate)
        }
    };

    let config = match resolved {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration");
            parse_config_content(&fs::read_to_string(&path)?)?
        }
        None => AppConfig::default(),
    };

    config.validate()?;
    Ok(config)
}

/// Parse and validate configuration TOML.
pub fn parse_config_content(content: &str) -> Result<AppConfig, AppError> {
    let config: AppConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
