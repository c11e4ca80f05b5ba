//! Diagnostics tool - a quick snapshot of the server's environment

use std::path::PathBuf;
use async_trait::async_trait;
use serde_json::{json, Value};
use crate::Result;
use super::logs::host_log_dir;
use super::Tool;

/// Report server version, process facts and credential presence
pub struct DebugInfoTool {
    log_dir: Option<PathBuf>,
}

impl DebugInfoTool {
    pub fn new(log_dir: Option<PathBuf>) -> Self {
        Self { log_dir }
    }
}

#[async_trait]
impl Tool for DebugInfoTool {
    fn name(&self) -> &str { "debug_info" }
    fn description(&self) -> &str { "Get information about the current server state" }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _params: Value) -> Result<String> {
        let cwd = std::env::current_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "unknown".to_string());
        let log_dir = host_log_dir(&self.log_dir);

        let info = vec![
            format!("Server version: {}", env!("CARGO_PKG_VERSION")),
            format!("Current working directory: {}", cwd),
            format!("Process ID: {}", std::process::id()),
            format!("Host log directory: {}", log_dir.display()),
            format!("Host log directory exists: {}", log_dir.exists()),
            format!(
                "OpenAI API key present: {}",
                std::env::var("OPENAI_API_KEY").is_ok()
            ),
            format!(
                "Anthropic API key present: {}",
                std::env::var("ANTHROPIC_API_KEY").is_ok()
            ),
        ];

        Ok(info.join("\n"))
    }
}
