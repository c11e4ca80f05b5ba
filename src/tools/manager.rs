//! Package-manager tools - one parameterized handler per family

use std::time::Duration;
use async_trait::async_trait;
use serde_json::{json, Value};
use crate::invoke::{self, ManagerSpec};
use crate::Result;
use crate::error::Error;
use super::Tool;

/// Runs one package-manager family's commands through the bounded
/// invocation pipeline. The five registered instances differ only in
/// the spec they carry.
pub struct ManagerTool {
    spec: &'static ManagerSpec,
    default_timeout_secs: u64,
}

impl ManagerTool {
    pub fn new(spec: &'static ManagerSpec, default_timeout_secs: u64) -> Self {
        Self {
            spec,
            default_timeout_secs,
        }
    }
}

#[async_trait]
impl Tool for ManagerTool {
    fn name(&self) -> &str { self.spec.tool_name }
    fn description(&self) -> &str { self.spec.summary }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "command": {
                    "type": "string",
                    "description": format!(
                        "The {} command to run, without the '{}' prefix. \
                         Arguments are split on whitespace; quoting is not interpreted.",
                        self.spec.display_name, self.spec.name
                    )
                },
                "directory": {
                    "type": "string",
                    "description": "Directory to run the command in (optional, defaults to the current directory)"
                },
                "timeout": {
                    "type": "integer",
                    "description": format!("Timeout in seconds (default: {})", self.default_timeout_secs)
                }
            },
            "required": ["command"]
        })
    }

    async fn execute(&self, params: Value) -> Result<String> {
        let command = params.get("command")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::Tool("Missing 'command' parameter".to_string()))?;

        let directory = params.get("directory").and_then(|v| v.as_str());

        let timeout_secs = params.get("timeout")
            .and_then(|v| v.as_u64())
            .unwrap_or(self.default_timeout_secs);

        invoke::run(
            self.spec,
            command,
            directory,
            Duration::from_secs(timeout_secs),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoke::spec;
    use tempfile::TempDir;

    static FAST: ManagerSpec = ManagerSpec {
        name: "true",
        display_name: "True",
        tool_name: "true_command",
        summary: "test manager",
        executable: "true",
        fallback_paths: &[],
        version_arg: "--version",
        manifest: "project.toml",
        lock_files: &[],
        cache_dir: "deps",
        install_hint: "unreachable",
    };

    #[test]
    fn test_name_and_description_come_from_the_spec() {
        let tool = ManagerTool::new(&spec::NPM, 60);
        assert_eq!(tool.name(), "npm_command");
        assert_eq!(tool.description(), "Run npm commands like install, run, test, etc.");
    }

    #[test]
    fn test_parameters_require_command() {
        let tool = ManagerTool::new(&spec::UV, 60);
        let schema = tool.parameters();
        assert_eq!(schema["required"], json!(["command"]));
    }

    #[tokio::test]
    async fn test_missing_command_parameter() {
        let tool = ManagerTool::new(&FAST, 60);
        let result = tool.execute(json!({})).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_empty_command_reports_validation_failure() {
        let tool = ManagerTool::new(&FAST, 60);
        let out = tool.execute(json!({"command": ""})).await.unwrap();
        assert_eq!(out, "Error: Empty command provided");
    }

    #[tokio::test]
    async fn test_runs_in_requested_directory() {
        let tmp = TempDir::new().unwrap();
        let tool = ManagerTool::new(&FAST, 60);

        let out = tool
            .execute(json!({
                "command": "install",
                "directory": tmp.path().to_str().unwrap()
            }))
            .await
            .unwrap();

        assert!(out.contains("Command: true install"));
        assert!(out.contains("Exit code: 0"));
    }
}
