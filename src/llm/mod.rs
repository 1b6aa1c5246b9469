//! Completion service client
//!
//! Text-in/text-out boundary around the hosted completion service: the full
//! conversation goes in, generated text (or a typed failure) comes out.

pub mod client;
mod error;
mod openai;

pub use client::LlmClient;
pub use error::LlmError;
pub use openai::OpenAiClient;
