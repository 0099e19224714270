//! Ollama-style chat API types.

use serde::{Deserialize, Serialize};

/// A chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system", "user", or "assistant"
    pub role: String,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat request body for `/api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model to use
    pub model: String,
    /// Messages in the conversation
    pub messages: Vec<ChatMessage>,
    /// Always false: the classifier wants one complete JSON reply
    pub stream: bool,
    /// Ask the server to constrain output to JSON
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Chat response body from `/api/chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// The assistant message
    pub message: ChatMessage,
    /// Whether generation finished
    #[serde(default)]
    pub done: bool,
}
