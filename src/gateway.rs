//! Completion gateway
//!
//! Per-turn bridge between the conversation and the completion service.
//! With no credential configured there is no client at all and every turn
//! answers offline. With a client, quota and rate-limit failures are
//! absorbed into a marked offline reply; anything else goes back to the
//! caller untouched.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::advisor::offline_reply;
use crate::config::LlmConfig;
use crate::conversation::Conversation;
use crate::llm::{LlmClient, LlmError, OpenAiClient};
use crate::prompts::QUOTA_NOTICE;

/// Obtains the assistant reply for each turn, remote or offline
pub struct CompletionGateway {
    client: Option<Arc<dyn LlmClient>>,
}

impl CompletionGateway {
    /// Gateway backed by the given client
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client: Some(client) }
    }

    /// Gateway with no remote client; every reply is synthesized locally
    pub fn offline() -> Self {
        Self { client: None }
    }

    /// Build a gateway from configuration: remote-backed when the API key
    /// environment variable is set, offline otherwise.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        if config.api_key().is_none() {
            debug!("from_config: no API key configured, gateway answers offline");
            return Ok(Self::offline());
        }
        Ok(Self::new(Arc::new(OpenAiClient::from_config(config)?)))
    }

    /// Whether this gateway has a remote client attached
    pub fn is_offline(&self) -> bool {
        self.client.is_none()
    }

    /// Produce the assistant reply for the current conversation.
    ///
    /// Recoverable failures (quota exhausted, rate limit) come back as a
    /// normal reply carrying the quota notice ahead of the offline
    /// synthesis; only other service failures surface as errors.
    pub async fn reply(&self, conversation: &Conversation) -> Result<String, LlmError> {
        let Some(client) = &self.client else {
            debug!("reply: answering offline (no credential)");
            return Ok(offline_reply(conversation).to_string());
        };

        match client.complete(conversation.messages()).await {
            Ok(text) => Ok(text),
            Err(e) if e.is_recoverable() => {
                warn!(error = %e, "reply: recoverable service failure, switching to offline reply");
                Ok(format!("{}\n\n{}", QUOTA_NOTICE, offline_reply(conversation)))
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::MockLlmClient;
    use crate::prompts::{CLARIFY_TEMPLATE, PLAN_TEMPLATE};

    fn conversation_with(user_text: &str) -> Conversation {
        let mut conversation = Conversation::new();
        conversation.push_user(user_text);
        conversation
    }

    #[tokio::test]
    async fn test_offline_gateway_insufficient_input() {
        let gateway = CompletionGateway::offline();
        let reply = gateway.reply(&conversation_with("hi")).await.unwrap();
        assert_eq!(reply, CLARIFY_TEMPLATE);
    }

    #[tokio::test]
    async fn test_offline_gateway_sufficient_input() {
        let gateway = CompletionGateway::offline();
        let conversation = conversation_with("我在學線代，推導卡住了，一週大概有5小時，下週要考試");
        let reply = gateway.reply(&conversation).await.unwrap();
        assert_eq!(reply, PLAN_TEMPLATE);
    }

    #[tokio::test]
    async fn test_offline_gateway_without_user_message() {
        let gateway = CompletionGateway::offline();
        let reply = gateway.reply(&Conversation::new()).await.unwrap();
        assert_eq!(reply, CLARIFY_TEMPLATE);
    }

    #[tokio::test]
    async fn test_remote_success_returns_text_verbatim() {
        let client = Arc::new(MockLlmClient::new(vec![Ok("model says hello".to_string())]));
        let gateway = CompletionGateway::new(client.clone());

        let reply = gateway.reply(&conversation_with("hi")).await.unwrap();

        assert_eq!(reply, "model says hello");
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_recoverable_failure_falls_back_with_notice() {
        let client = Arc::new(MockLlmClient::new(vec![Err(LlmError::ApiError {
            status: 429,
            message: "Too Many Requests".to_string(),
        })]));
        let gateway = CompletionGateway::new(client);

        let reply = gateway.reply(&conversation_with("hi")).await.unwrap();

        assert!(reply.starts_with(QUOTA_NOTICE));
        assert_eq!(reply, format!("{}\n\n{}", QUOTA_NOTICE, CLARIFY_TEMPLATE));
    }

    #[tokio::test]
    async fn test_quota_signal_in_error_body_falls_back() {
        let client = Arc::new(MockLlmClient::new(vec![Err(LlmError::ApiError {
            status: 400,
            message: r#"{"error":{"code":"insufficient_quota"}}"#.to_string(),
        })]));
        let gateway = CompletionGateway::new(client);

        let conversation = conversation_with("下週期末考，時間只剩一週");
        let reply = gateway.reply(&conversation).await.unwrap();

        assert_eq!(reply, format!("{}\n\n{}", QUOTA_NOTICE, PLAN_TEMPLATE));
    }

    #[tokio::test]
    async fn test_other_failure_propagates() {
        let client = Arc::new(MockLlmClient::new(vec![Err(LlmError::ApiError {
            status: 500,
            message: "Internal Server Error".to_string(),
        })]));
        let gateway = CompletionGateway::new(client);

        let result = gateway.reply(&conversation_with("hi")).await;

        assert!(matches!(result, Err(LlmError::ApiError { status: 500, .. })));
    }
}
