//! LlmClient trait definition

use async_trait::async_trait;

use super::LlmError;
use crate::conversation::Message;

/// Text-in/text-out completion client.
///
/// The full conversation history is replayed verbatim on every call; the
/// client keeps no state between turns. One call per turn, blocking until
/// the service answers or fails.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Request one completion for the given history
    async fn complete(&self, messages: &[Message]) -> Result<String, LlmError>;
}
