//! Shared testing utilities for draftsmith CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[allow(dead_code)]
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Testing harness providing an isolated working directory for CLI invocations.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    /// Path to the directory used as the working directory of CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled `draftsmith` binary without credentials.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("draftsmith").expect("Failed to locate draftsmith binary");
        cmd.current_dir(&self.work_dir)
            .env("HOME", self.root.path())
            .env_remove(API_KEY_ENV)
            .env("DRAFTSMITH_LOG", "off");
        cmd
    }

    /// Write `draftsmith.toml` into the working directory.
    pub fn write_config(&self, content: &str) -> PathBuf {
        let path = self.work_dir.join("draftsmith.toml");
        fs::write(&path, content).expect("Failed to write config");
        path
    }

    /// Config pointing the generation endpoint at `api_base`, with typing delay disabled.
    pub fn write_service_config(&self, api_base: &str) -> PathBuf {
        self.write_config(&format!(
            r#"[generation]
api_base = "{}"
model = "gemini-test"
timeout_secs = 5
max_retries = 0

[display]
chunk_delay_ms = 0
"#,
            api_base
        ))
    }
}

/// A successful `generateContent` response body carrying `text`.
#[allow(dead_code)]
pub fn gemini_reply(text: &str) -> String {
    serde_json::json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
    })
    .to_string()
}
