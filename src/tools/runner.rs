//! Tool runner - manages and executes tools

use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::config::Config;
use crate::invoke::spec;
use crate::Result;
use crate::error::Error;
use super::Tool;
use super::manager::ManagerTool;
use super::time::{TimestampTool, EchoTool};
use super::chat::{OpenAiChatTool, ClaudeChatTool};
use super::logs::{ListLogsTool, ReadLogsTool};
use super::sqlite::SqliteQueryTool;
use super::debug::DebugInfoTool;

/// Tool definition for listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Tool runner manages registered tools and executes them
pub struct ToolRunner {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRunner {
    /// Create an empty tool runner
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Create a tool runner with the full default tool set
    pub fn new_with_defaults(config: &Config) -> Self {
        let mut runner = Self::new();

        // Package-manager tools, one per family
        for manager in spec::ALL {
            runner.register(ManagerTool::new(manager, config.default_timeout_secs));
        }

        // Time tools
        runner.register(TimestampTool);
        runner.register(EchoTool);

        // Chat tools
        runner.register(OpenAiChatTool::new());
        runner.register(ClaudeChatTool::new());

        // Host log tools
        runner.register(ListLogsTool::new(config.log_dir.clone()));
        runner.register(ReadLogsTool::new(config.log_dir.clone()));

        // Database tool
        runner.register(SqliteQueryTool::new(config.sqlite_max_rows));

        // Diagnostics
        runner.register(DebugInfoTool::new(config.log_dir.clone()));

        runner
    }

    /// Register a tool
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.tools.insert(tool.name().to_string(), Box::new(tool));
    }

    /// Get definitions for all registered tools
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values()
            .map(|t| t.to_definition())
            .collect()
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, params: Value) -> Result<String> {
        let tool = self.tools.get(name)
            .ok_or_else(|| Error::Tool(format!("Unknown tool: {}", name)))?;

        tool.execute(params).await
    }

    /// Check if a tool exists
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// List registered tool names
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for ToolRunner {
    fn default() -> Self {
        Self::new()
    }
}
