//! Learning advisor chat agent
//!
//! A task-oriented advisory chat: collects the user's learning situation,
//! asks follow-up questions while context is thin, and emits a structured
//! study plan once there is enough to act on. Replies come from a hosted
//! completion service when a credential is configured, with a deterministic
//! offline fallback used for demos and absorbed quota failures.
//!
//! # Modules
//!
//! - [`conversation`] - Role-tagged chat history and JSON export
//! - [`advisor`] - Sufficiency classifier and offline response synthesis
//! - [`llm`] - Completion service client
//! - [`gateway`] - Per-turn remote/offline dispatch
//! - [`session`] - Interactive chat session
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod advisor;
pub mod cli;
pub mod config;
pub mod conversation;
pub mod gateway;
pub mod llm;
pub mod prompts;
pub mod session;

// Re-export commonly used types
pub use advisor::{Verdict, classify, offline_reply, synthesize};
pub use config::{Config, LlmConfig};
pub use conversation::{Conversation, Message, Role};
pub use gateway::CompletionGateway;
pub use llm::{LlmClient, LlmError, OpenAiClient};
pub use session::{ChatSession, TurnError};
