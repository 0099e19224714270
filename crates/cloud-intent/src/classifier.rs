//! CloudClassifier implementation over a chat-completions endpoint.

use assistant_core::{
    async_trait, decode_intent_response, ClassifierError, IntentClassifier, IntentResult,
};
use reqwest::Client;
use tracing::{debug, info};

use crate::api::{ApiError, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::config::CloudIntentConfig;

/// The primary remote classification provider.
///
/// Each attempt is a single stateless chat-completion call carrying the
/// shared system prompt. The request-level timeout bounds how long a slow
/// endpoint can hold up the chain; an elapsed timeout surfaces as a
/// transport error and is not retried here.
pub struct CloudClassifier {
    client: Client,
    config: CloudIntentConfig,
}

impl CloudClassifier {
    /// Create a new classifier with the given configuration.
    pub fn new(config: CloudIntentConfig) -> Result<Self, ClassifierError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                ClassifierError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        info!(
            "CloudClassifier initialized with model: {}, timeout: {}s",
            config.model, config.timeout_secs
        );

        Ok(Self { client, config })
    }

    /// Create a classifier from environment variables.
    ///
    /// See [`CloudIntentConfig::from_env`] for the variables involved.
    pub fn from_env() -> Result<Self, ClassifierError> {
        Self::new(CloudIntentConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &CloudIntentConfig {
        &self.config
    }

    /// Make a chat completion request.
    async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatCompletionResponse, ClassifierError> {
        let url = format!("{}/v1/chat/completions", self.config.api_url);

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!("Sending classification request to {}", url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClassifierError::Timeout
                } else {
                    ClassifierError::Network(format!("Failed to send request: {}", e))
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            // Prefer the structured error message when the endpoint sends one
            if let Ok(api_error) = serde_json::from_str::<ApiError>(&body) {
                return Err(ClassifierError::BadStatus {
                    status: status.as_u16(),
                    body: api_error.error.message,
                });
            }

            return Err(ClassifierError::BadStatus {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ClassifierError::Malformed(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl IntentClassifier for CloudClassifier {
    async fn classify(&self, text: &str) -> Result<IntentResult, ClassifierError> {
        let messages = vec![
            ChatMessage::system(self.config.system_prompt.clone()),
            ChatMessage::user(text),
        ];

        let completion = self.chat_completion(messages).await?;

        let content = completion
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .ok_or_else(|| ClassifierError::Malformed("no content in response".to_string()))?;

        if let Some(usage) = completion.usage {
            debug!(
                "Token usage - prompt: {}, completion: {}, total: {}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        decode_intent_response(content)
    }

    fn name(&self) -> &str {
        "CloudClassifier"
    }
}
