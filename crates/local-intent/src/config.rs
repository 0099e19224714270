//! Configuration for the local classifier.

use std::env;
use std::time::Duration;

use assistant_core::load_system_prompt;

/// Default time budget for one local attempt, in milliseconds.
const DEFAULT_TIMEOUT_MS: u64 = 4000;

/// Configuration for [`LocalClassifier`](crate::LocalClassifier).
///
/// Unlike the cloud provider there is no required key: a default
/// configuration points at the conventional local Ollama port.
#[derive(Debug, Clone)]
pub struct LocalIntentConfig {
    /// Base URL of the local chat server.
    pub api_url: String,

    /// Model name to use.
    pub model: String,

    /// System prompt enumerating the label set and reply shape.
    pub system_prompt: String,

    /// Whole-attempt time budget in milliseconds.
    pub timeout_ms: u64,
}

impl Default for LocalIntentConfig {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:11434".to_string(),
            model: "llama3.2".to_string(),
            system_prompt: assistant_core::DEFAULT_SYSTEM_PROMPT.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl LocalIntentConfig {
    /// Create configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `LOCAL_INTENT_URL` - Server URL (default: http://127.0.0.1:11434)
    /// - `LOCAL_INTENT_MODEL` - Model name (default: llama3.2)
    /// - `LOCAL_INTENT_TIMEOUT_MS` - Attempt budget (default: 4000)
    ///
    /// The system prompt follows the shared loader precedence.
    pub fn from_env() -> Self {
        let api_url = env::var("LOCAL_INTENT_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:11434".to_string());

        let model = env::var("LOCAL_INTENT_MODEL").unwrap_or_else(|_| "llama3.2".to_string());

        let timeout_ms = env::var("LOCAL_INTENT_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        Self {
            api_url,
            model,
            system_prompt: load_system_prompt(),
            timeout_ms,
        }
    }

    /// Set the server URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the attempt budget in milliseconds.
    pub fn with_timeout_ms(mut self, ms: u64) -> Self {
        self.timeout_ms = ms;
        self
    }

    /// The attempt budget as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LocalIntentConfig::default();
        assert_eq!(config.api_url, "http://127.0.0.1:11434");
        assert_eq!(config.timeout(), Duration::from_millis(DEFAULT_TIMEOUT_MS));
    }

    #[test]
    fn test_builder() {
        let config = LocalIntentConfig::default()
            .with_api_url("http://10.0.0.2:11434")
            .with_model("phi3")
            .with_timeout_ms(500);

        assert_eq!(config.api_url, "http://10.0.0.2:11434");
        assert_eq!(config.model, "phi3");
        assert_eq!(config.timeout_ms, 500);
    }
}
