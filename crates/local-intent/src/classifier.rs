//! LocalClassifier implementation over an Ollama-style endpoint.

use assistant_core::{
    async_trait, decode_intent_response, ClassifierError, IntentClassifier, IntentResult,
};
use reqwest::Client;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::api::{ChatMessage, ChatRequest, ChatResponse};
use crate::config::LocalIntentConfig;

/// The secondary classification provider, backed by a locally hosted model.
///
/// The entire attempt (connect, send, receive, decode the body) runs under
/// one `tokio::time::timeout`. Elapsing the budget drops the in-flight
/// future and yields [`ClassifierError::Timeout`]; the attempt is treated
/// as failed, not retried.
pub struct LocalClassifier {
    client: Client,
    config: LocalIntentConfig,
}

impl LocalClassifier {
    /// Create a new classifier with the given configuration.
    pub fn new(config: LocalIntentConfig) -> Result<Self, ClassifierError> {
        let client = Client::builder().build().map_err(|e| {
            ClassifierError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        info!(
            "LocalClassifier initialized with model: {}, budget: {}ms",
            config.model, config.timeout_ms
        );

        Ok(Self { client, config })
    }

    /// Create a classifier from environment variables.
    ///
    /// See [`LocalIntentConfig::from_env`] for the variables involved.
    pub fn from_env() -> Result<Self, ClassifierError> {
        Self::new(LocalIntentConfig::from_env())
    }

    /// Get the configuration.
    pub fn config(&self) -> &LocalIntentConfig {
        &self.config
    }

    /// One unbounded attempt; the caller applies the time budget.
    async fn chat(&self, text: &str) -> Result<IntentResult, ClassifierError> {
        let url = format!("{}/api/chat", self.config.api_url);

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(self.config.system_prompt.clone()),
                ChatMessage::user(text),
            ],
            stream: false,
            format: Some("json".to_string()),
        };

        debug!("Sending classification request to {}", url);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClassifierError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::BadStatus {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| ClassifierError::Malformed(format!("Failed to parse response: {}", e)))?;

        decode_intent_response(&reply.message.content)
    }
}

#[async_trait]
impl IntentClassifier for LocalClassifier {
    async fn classify(&self, text: &str) -> Result<IntentResult, ClassifierError> {
        match timeout(self.config.timeout(), self.chat(text)).await {
            Ok(result) => result,
            Err(_) => Err(ClassifierError::Timeout),
        }
    }

    fn name(&self) -> &str {
        "LocalClassifier"
    }
}
