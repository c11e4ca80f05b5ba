//! Time tools - timestamps and a liveness echo

use async_trait::async_trait;
use chrono::Local;
use serde_json::{json, Value};
use crate::Result;
use super::Tool;

/// Current time in one of three formats
pub struct TimestampTool;

#[async_trait]
impl Tool for TimestampTool {
    fn name(&self) -> &str { "get_timestamp" }
    fn description(&self) -> &str { "Get current timestamp in various formats" }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "format": {
                    "type": "string",
                    "enum": ["iso", "unix", "readable"],
                    "description": "Output format (default: iso)"
                }
            }
        })
    }

    async fn execute(&self, params: Value) -> Result<String> {
        let format = params.get("format").and_then(|v| v.as_str()).unwrap_or("iso");
        let now = Local::now();

        let formatted = match format {
            "unix" => now.timestamp().to_string(),
            "readable" => now.format("%Y-%m-%d %H:%M:%S").to_string(),
            // anything else falls back to iso
            _ => now.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        };
        Ok(formatted)
    }
}

/// Echoes a message back with the current clock time, for checking the
/// server is alive
pub struct EchoTool;

#[async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &str { "echo" }
    fn description(&self) -> &str { "Echo a message back to verify the server is working" }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "message": {
                    "type": "string",
                    "description": "A message to echo back (default: Hello)"
                }
            }
        })
    }

    async fn execute(&self, params: Value) -> Result<String> {
        let message = params.get("message").and_then(|v| v.as_str()).unwrap_or("Hello");
        Ok(format!("Echo: {} at {}", message, Local::now().format("%H:%M:%S")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_timestamp_default_is_iso() {
        let out = TimestampTool.execute(json!({})).await.unwrap();
        assert!(out.contains('T'));
        assert!(out.contains('.'));
    }

    #[tokio::test]
    async fn test_timestamp_unix_is_numeric() {
        let out = TimestampTool.execute(json!({"format": "unix"})).await.unwrap();
        let secs: i64 = out.parse().unwrap();
        // sometime after 2020
        assert!(secs > 1_577_836_800);
    }

    #[tokio::test]
    async fn test_timestamp_readable_layout() {
        let out = TimestampTool.execute(json!({"format": "readable"})).await.unwrap();
        assert_eq!(out.len(), 19);
        assert_eq!(&out[4..5], "-");
        assert_eq!(&out[10..11], " ");
    }

    #[tokio::test]
    async fn test_unknown_format_falls_back_to_iso() {
        let out = TimestampTool.execute(json!({"format": "stardate"})).await.unwrap();
        assert!(out.contains('T'));
    }

    #[tokio::test]
    async fn test_echo_wraps_message() {
        let out = EchoTool.execute(json!({"message": "ping"})).await.unwrap();
        assert!(out.starts_with("Echo: ping at "));
    }

    #[tokio::test]
    async fn test_echo_default_message() {
        let out = EchoTool.execute(json!({})).await.unwrap();
        assert!(out.starts_with("Echo: Hello at "));
    }
}
