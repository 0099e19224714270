//! Configuration for the cloud classifier.

use std::env;
use std::time::Duration;

use assistant_core::{load_system_prompt, ClassifierError};

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 8;

/// Configuration for [`CloudClassifier`](crate::CloudClassifier).
#[derive(Debug, Clone)]
pub struct CloudIntentConfig {
    /// Chat-completions API base URL.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// System prompt enumerating the label set and reply shape.
    pub system_prompt: String,

    /// Maximum tokens for the reply. Classifications are small.
    pub max_tokens: Option<u32>,

    /// Temperature for generation. Zero keeps classification deterministic.
    pub temperature: Option<f32>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for CloudIntentConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            system_prompt: assistant_core::DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tokens: Some(256),
            temperature: Some(0.0),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl CloudIntentConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `CLOUD_INTENT_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `CLOUD_INTENT_API_URL` - API URL (default: https://api.openai.com)
    /// - `CLOUD_INTENT_MODEL` - Model name (default: gpt-4o-mini)
    /// - `CLOUD_INTENT_MAX_TOKENS` - Max tokens (default: 256)
    /// - `CLOUD_INTENT_TIMEOUT_SECS` - Request timeout (default: 8)
    ///
    /// The system prompt follows the shared loader precedence
    /// (`CLASSIFIER_SYSTEM_PROMPT` env var, then prompt file, then the
    /// embedded default).
    pub fn from_env() -> Result<Self, ClassifierError> {
        let api_key = env::var("CLOUD_INTENT_API_KEY")
            .map_err(|_| ClassifierError::Configuration("CLOUD_INTENT_API_KEY not set".to_string()))?;

        let api_url = env::var("CLOUD_INTENT_API_URL")
            .unwrap_or_else(|_| "https://api.openai.com".to_string());

        let model =
            env::var("CLOUD_INTENT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        let max_tokens = env::var("CLOUD_INTENT_MAX_TOKENS")
            .ok()
            .and_then(|s| s.parse().ok());

        let timeout_secs = env::var("CLOUD_INTENT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            api_url,
            api_key,
            model,
            system_prompt: load_system_prompt(),
            max_tokens: max_tokens.or(Some(256)),
            temperature: Some(0.0),
            timeout_secs,
        })
    }

    /// Create a new configuration with required fields.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            ..Default::default()
        }
    }

    /// Set the API URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// The request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
