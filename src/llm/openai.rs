//! OpenAI-compatible chat completions client
//!
//! Implements the LlmClient trait against the Chat Completions API. One
//! blocking request per turn; no retries here, the gateway decides what a
//! failure means for the turn.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{LlmClient, LlmError};
use crate::config::LlmConfig;
use crate::conversation::Message;

/// Chat completions client
pub struct OpenAiClient {
    model: String,
    api_key: String,
    base_url: String,
    max_tokens: u32,
    http: Client,
}

impl OpenAiClient {
    /// Create a client from configuration, resolving the API key from the
    /// configured environment variable.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let api_key = config
            .api_key()
            .ok_or_else(|| LlmError::MissingApiKey(config.api_key_env.clone()))?;

        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(LlmError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            api_key,
            base_url: config.base_url.clone(),
            max_tokens: config.max_tokens,
            http,
        })
    }

    /// Build the request body: the conversation replayed verbatim
    fn build_request_body(&self, messages: &[Message]) -> serde_json::Value {
        // GPT-5.x and o1/o3 models use max_completion_tokens instead of max_tokens
        let uses_completion_tokens =
            self.model.starts_with("gpt-5") || self.model.starts_with("o1") || self.model.starts_with("o3");

        let mut body = serde_json::json!({
            "model": self.model,
            "messages": messages,
        });

        if uses_completion_tokens {
            body["max_completion_tokens"] = serde_json::json!(self.max_tokens);
        } else {
            body["max_tokens"] = serde_json::json!(self.max_tokens);
        }

        body
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, messages: &[Message]) -> Result<String, LlmError> {
        debug!(model = %self.model, message_count = messages.len(), "complete: called");
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = self.build_request_body(messages);

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(LlmError::Network)?;

        let status = response.status().as_u16();

        if status == 429 {
            debug!("complete: rate limited (429)");
            let retry_after_secs = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);

            return Err(LlmError::RateLimited { retry_after_secs });
        }

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            debug!(status, "complete: API error");
            return Err(LlmError::ApiError { status, message: text });
        }

        let api_response: ChatResponse = response.json().await?;
        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("Response contained no message content".to_string()))?;

        debug!(reply_len = content.len(), "complete: success");
        Ok(content)
    }
}

// Chat Completions API response types

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}
