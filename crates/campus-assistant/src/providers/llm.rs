//! LLM provider trait for structured generation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// JSON schema the model output must follow
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSchema {
    /// Schema title, sent as the response format name
    pub name: &'static str,
    /// Instruction describing the task to the model
    pub description: &'static str,
    /// The JSON schema body
    pub schema: serde_json::Value,
}

/// Trait for chat models that can answer in a fixed JSON shape
///
/// Implementations:
/// - `OpenAiClient`: OpenAI-compatible chat completions API
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send the conversation and return the model's JSON object
    ///
    /// Implementations only guarantee the result is a JSON value; callers
    /// validate it against their own contract.
    async fn generate_structured(
        &self,
        messages: &[ChatMessage],
        schema: &OutputSchema,
    ) -> Result<serde_json::Value>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
