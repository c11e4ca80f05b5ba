//! Tools module - the callable surface
//!
//! Each tool is an independent, stateless request handler: package-manager
//! commands, timestamps, chat APIs, host log inspection, and SQLite
//! queries. An external dispatcher drives them through the `ToolRunner`.

mod runner;
mod manager;
mod time;
mod chat;
mod logs;
mod sqlite;
mod debug;

pub use runner::{ToolRunner, ToolDefinition};
pub use manager::ManagerTool;
pub use time::{TimestampTool, EchoTool};
pub use chat::{OpenAiChatTool, ClaudeChatTool};
pub use logs::{ListLogsTool, ReadLogsTool};
pub use sqlite::SqliteQueryTool;
pub use debug::DebugInfoTool;

use async_trait::async_trait;
use serde_json::Value;
use crate::Result;

/// Tool trait - interface for all callable tools
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name used in calls
    fn name(&self) -> &str;

    /// Description of what the tool does
    fn description(&self) -> &str;

    /// JSON Schema for parameters
    fn parameters(&self) -> Value;

    /// Execute the tool with given parameters
    async fn execute(&self, params: Value) -> Result<String>;

    /// Convert to a definition for listing
    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters(),
        }
    }
}

/// Dummy tool for testing
pub struct DummyTool {
    pub name: String,
    pub result: String,
}

#[async_trait]
impl Tool for DummyTool {
    fn name(&self) -> &str { &self.name }
    fn description(&self) -> &str { "Dummy tool for testing" }
    fn parameters(&self) -> Value { serde_json::json!({"type": "object"}) }

    async fn execute(&self, _params: Value) -> Result<String> {
        Ok(self.result.clone())
    }
}
