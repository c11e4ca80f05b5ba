//! Chat tools - OpenAI and Anthropic proxies
//!
//! Each tool sends one prompt as a single user message and returns the
//! first text answer. API keys come from the environment.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use crate::Result;
use crate::error::Error;
use super::Tool;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

const DEFAULT_OPENAI_MODEL: &str = "gpt-4.1-mini";
const DEFAULT_CLAUDE_MODEL: &str = "claude-sonnet-4-20250514";

/// Send a prompt to OpenAI and get a response
pub struct OpenAiChatTool {
    client: Client,
}

impl OpenAiChatTool {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for OpenAiChatTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for OpenAiChatTool {
    fn name(&self) -> &str { "openai_chat" }
    fn description(&self) -> &str { "Send a prompt to OpenAI and get a response" }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "prompt": {
                    "type": "string",
                    "description": "The prompt to send"
                },
                "model": {
                    "type": "string",
                    "description": format!("Model to use (default: {})", DEFAULT_OPENAI_MODEL)
                },
                "max_tokens": {
                    "type": "integer",
                    "description": "Maximum tokens in the response (default: 500)"
                }
            },
            "required": ["prompt"]
        })
    }

    async fn execute(&self, params: Value) -> Result<String> {
        let prompt = params.get("prompt")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::Tool("Missing 'prompt' parameter".to_string()))?;
        let model = params.get("model")
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_OPENAI_MODEL);
        let max_tokens = params.get("max_tokens").and_then(|v| v.as_u64()).unwrap_or(500);

        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| Error::Chat("OPENAI_API_KEY not found in environment variables".to_string()))?;

        let request = json!({
            "model": model,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": max_tokens
        });

        let response = self.client
            .post(OPENAI_API_URL)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(Error::Chat(format!("OpenAI API error: {}", error_text)));
        }

        let completion: OpenAiResponse = response.json().await?;
        extract_openai_text(completion)
    }
}

/// Send a prompt to Claude (Anthropic) and get a response
pub struct ClaudeChatTool {
    client: Client,
}

impl ClaudeChatTool {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for ClaudeChatTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for ClaudeChatTool {
    fn name(&self) -> &str { "claude_chat" }
    fn description(&self) -> &str { "Send a prompt to Claude (Anthropic) and get a response" }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "prompt": {
                    "type": "string",
                    "description": "The prompt to send"
                },
                "model": {
                    "type": "string",
                    "description": format!("Model to use (default: {})", DEFAULT_CLAUDE_MODEL)
                },
                "max_tokens": {
                    "type": "integer",
                    "description": "Maximum tokens in the response (default: 1000)"
                }
            },
            "required": ["prompt"]
        })
    }

    async fn execute(&self, params: Value) -> Result<String> {
        let prompt = params.get("prompt")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::Tool("Missing 'prompt' parameter".to_string()))?;
        let model = params.get("model")
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_CLAUDE_MODEL);
        let max_tokens = params.get("max_tokens").and_then(|v| v.as_u64()).unwrap_or(1000);

        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| Error::Chat("ANTHROPIC_API_KEY not found in environment variables".to_string()))?;

        let request = json!({
            "model": model,
            "max_tokens": max_tokens,
            "messages": [{"role": "user", "content": prompt}]
        });

        let response = self.client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(Error::Chat(format!("Anthropic API error: {}", error_text)));
        }

        let message: ClaudeResponse = response.json().await?;
        extract_claude_text(message)
    }
}

fn extract_openai_text(response: OpenAiResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| Error::Chat("No response text in OpenAI reply".to_string()))
}

fn extract_claude_text(response: ClaudeResponse) -> Result<String> {
    response
        .content
        .into_iter()
        .find_map(|block| block.text)
        .ok_or_else(|| Error::Chat("No response text in Anthropic reply".to_string()))
}

// OpenAI chat-completions response types
#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
}

// Anthropic messages response types
#[derive(Debug, Deserialize)]
struct ClaudeResponse {
    content: Vec<ClaudeContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ClaudeContentBlock {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_openai_first_choice() {
        let response: OpenAiResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "hi there"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_openai_text(response).unwrap(), "hi there");
    }

    #[test]
    fn test_extract_openai_empty_choices_is_error() {
        let response: OpenAiResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(extract_openai_text(response).is_err());
    }

    #[test]
    fn test_extract_claude_first_text_block() {
        let response: ClaudeResponse = serde_json::from_str(
            r#"{"content": [{"type": "text", "text": "hello back"}]}"#,
        )
        .unwrap();
        assert_eq!(extract_claude_text(response).unwrap(), "hello back");
    }

    #[test]
    fn test_extract_claude_skips_non_text_blocks() {
        let response: ClaudeResponse = serde_json::from_str(
            r#"{"content": [{"type": "thinking"}, {"type": "text", "text": "after"}]}"#,
        )
        .unwrap();
        assert_eq!(extract_claude_text(response).unwrap(), "after");
    }

    #[test]
    fn test_prompt_is_required() {
        let schema = OpenAiChatTool::new().parameters();
        assert_eq!(schema["required"], json!(["prompt"]));
        let schema = ClaudeChatTool::new().parameters();
        assert_eq!(schema["required"], json!(["prompt"]));
    }
}
