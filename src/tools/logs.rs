//! Host log tools - locate and tail log files, no parsing
//!
//! The host application writes `mcp.log` plus one `mcp-server-<name>.log`
//! per tool server under its platform log directory. These tools list
//! those files and read their tails by reading the files directly.

use std::path::{Path, PathBuf};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde_json::{json, Value};
use crate::Result;
use super::Tool;

/// This server's own log file in the host directory.
const SERVER_LOG: &str = "mcp-server-toolsmith.log";

/// The host log directory: the configured override, or the platform
/// default under the home directory.
pub(crate) fn host_log_dir(overridden: &Option<PathBuf>) -> PathBuf {
    match overridden {
        Some(dir) => dir.clone(),
        None => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("Library")
            .join("Logs")
            .join("Claude"),
    }
}

/// List the log files in the host log directory
pub struct ListLogsTool {
    log_dir: Option<PathBuf>,
}

impl ListLogsTool {
    pub fn new(log_dir: Option<PathBuf>) -> Self {
        Self { log_dir }
    }
}

#[async_trait]
impl Tool for ListLogsTool {
    fn name(&self) -> &str { "list_host_logs" }
    fn description(&self) -> &str {
        "List host log files with their sizes and modification times"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _params: Value) -> Result<String> {
        let dir = host_log_dir(&self.log_dir);
        if !dir.exists() {
            return Ok(format!("Host log directory not found: {}", dir.display()));
        }

        let mut files = log_files_matching(&dir, |name| name.ends_with(".log"))?;
        if files.is_empty() {
            return Ok("No log files found in the log directory".to_string());
        }
        files.sort();

        let mut result = vec!["Host log files:".to_string()];
        for file in files {
            let name = file_name(&file);
            match std::fs::metadata(&file) {
                Ok(meta) => {
                    let size_mb = meta.len() as f64 / (1024.0 * 1024.0);
                    let modified = meta
                        .modified()
                        .map(|m| DateTime::<Local>::from(m).format("%Y-%m-%d %H:%M:%S").to_string())
                        .unwrap_or_else(|_| "unknown".to_string());
                    result.push(format!("  {} - {:.2}MB - Modified: {}", name, size_mb, modified));
                }
                Err(err) => result.push(format!("  {} - Error reading: {}", name, err)),
            }
        }

        Ok(result.join("\n"))
    }
}

/// Read the tail of host log files
pub struct ReadLogsTool {
    log_dir: Option<PathBuf>,
}

impl ReadLogsTool {
    pub fn new(log_dir: Option<PathBuf>) -> Self {
        Self { log_dir }
    }
}

#[async_trait]
impl Tool for ReadLogsTool {
    fn name(&self) -> &str { "read_host_logs" }
    fn description(&self) -> &str { "Read recent lines from host log files" }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "kind": {
                    "type": "string",
                    "enum": ["mcp", "server", "all"],
                    "description": "Which logs to read: the shared mcp log, this server's log, or every mcp log (default: mcp)"
                },
                "lines": {
                    "type": "integer",
                    "description": "Number of recent lines per file (default: 20)"
                }
            }
        })
    }

    async fn execute(&self, params: Value) -> Result<String> {
        let kind = params.get("kind").and_then(|v| v.as_str()).unwrap_or("mcp");
        let lines = params.get("lines").and_then(|v| v.as_u64()).unwrap_or(20) as usize;

        let dir = host_log_dir(&self.log_dir);
        if !dir.exists() {
            return Ok(format!("Host log directory not found: {}", dir.display()));
        }

        let files = match kind {
            "mcp" => vec![dir.join("mcp.log")],
            "server" => vec![dir.join(SERVER_LOG)],
            "all" => {
                let mut all = log_files_matching(&dir, |name| {
                    name.starts_with("mcp") && name.ends_with(".log")
                })?;
                all.sort();
                all
            }
            other => {
                return Ok(format!(
                    "Unknown log type: {}. Use 'mcp', 'server', or 'all'",
                    other
                ));
            }
        };

        let mut result = Vec::new();
        for file in &files {
            if !file.exists() {
                continue;
            }
            let name = file_name(file);
            match std::fs::read_to_string(file) {
                Ok(content) => {
                    let tail = tail_lines(&content, lines);
                    if tail.is_empty() {
                        result.push(format!("=== {} === (empty or no recent entries)", name));
                    } else {
                        result.push(format!("=== {} ===\n{}", name, tail));
                    }
                }
                Err(err) => result.push(format!("=== {} === (error: {})", name, err)),
            }
        }

        if result.is_empty() {
            return Ok(format!("No log files found for type: {}", kind));
        }
        Ok(result.join("\n\n"))
    }
}

fn log_files_matching(dir: &Path, matches: impl Fn(&str) -> bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if let Some(name) = entry.file_name().to_str() {
            if matches(name) && entry.path().is_file() {
                files.push(entry.path());
            }
        }
    }
    Ok(files)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Last `count` lines of `content`, trailing newline ignored.
fn tail_lines(content: &str, count: usize) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let start = lines.len().saturating_sub(count);
    lines[start..].join("\n").trim().to_string()
}
