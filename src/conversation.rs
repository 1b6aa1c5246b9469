//! Conversation history for one advisory session
//!
//! The conversation is literal chat history: an ordered list of role-tagged
//! messages, replayed verbatim to the completion service on every turn. The
//! first entry is always the single system message; a reset discards
//! everything and reseeds it together with the fixed greeting.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::prompts::{GREETING, SYSTEM_PROMPT};

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single chat message, immutable once created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a system message
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: text.into(),
        }
    }

    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
        }
    }
}

/// Ordered chat history owned by the active session
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Create a conversation seeded with the system prompt and the greeting
    pub fn new() -> Self {
        let mut conversation = Self { messages: Vec::new() };
        conversation.reseed();
        conversation
    }

    fn reseed(&mut self) {
        self.messages.push(Message::system(SYSTEM_PROMPT));
        self.messages.push(Message::assistant(GREETING));
    }

    /// Discard all history and reseed the system prompt plus greeting
    pub fn reset(&mut self) {
        debug!(discarded = self.messages.len(), "Conversation::reset: called");
        self.messages.clear();
        self.reseed();
    }

    /// Append a user message
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.messages.push(Message::user(text));
    }

    /// Append an assistant message
    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.messages.push(Message::assistant(text));
    }

    /// Full history in insertion order, including the leading system message
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Content of the most recent user message, if there is one
    pub fn latest_user_text(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }

    /// Number of messages in the history
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True when the history holds no messages at all
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Export the history as pretty-printed UTF-8 JSON.
    ///
    /// The artifact is an array of `{role, content}` objects in conversation
    /// order; this is the one user-facing interchange format, so field names
    /// and ordering are load-bearing.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.messages)
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
