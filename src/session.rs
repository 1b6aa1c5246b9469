//! Interactive chat session
//!
//! Owns the conversation for its lifetime: reads user input, runs one turn
//! through the completion gateway per message, and renders history. Nothing
//! survives the session except an explicit `/export` snapshot.

use std::fs;
use std::path::Path;

use colored::Colorize;
use eyre::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::LlmConfig;
use crate::conversation::{Conversation, Role};
use crate::gateway::CompletionGateway;
use crate::llm::LlmError;

/// Default path for `/export` when none is given
const DEFAULT_EXPORT_PATH: &str = "chat_log.json";

/// Why a single turn could not produce a reply
#[derive(Debug, Error)]
pub enum TurnError {
    /// No credential configured; the conversation is left untouched and the
    /// session stays usable once the key is set
    #[error("API key not set. Set the {0} environment variable before chatting.")]
    MissingApiKey(String),

    /// Unrecoverable service failure; the turn is aborted
    #[error(transparent)]
    Service(#[from] LlmError),
}

/// Interactive advisory chat session
pub struct ChatSession {
    config: LlmConfig,
    gateway: CompletionGateway,
    conversation: Conversation,
}

impl ChatSession {
    /// Create a session, building the gateway from configuration
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let gateway = CompletionGateway::from_config(&config)?;
        Ok(Self::with_gateway(config, gateway))
    }

    /// Create a session around an existing gateway
    pub fn with_gateway(config: LlmConfig, gateway: CompletionGateway) -> Self {
        Self {
            config,
            gateway,
            conversation: Conversation::new(),
        }
    }

    /// Current conversation history
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Run one turn: append the user message, obtain the reply, append it.
    ///
    /// A turn refuses to start without a configured credential. On an
    /// unrecoverable service failure the already-appended user message is
    /// retained and the next turn continues from there.
    pub async fn turn(&mut self, input: &str) -> Result<String, TurnError> {
        if self.config.api_key().is_none() {
            debug!("turn: refused, no API key configured");
            return Err(TurnError::MissingApiKey(self.config.api_key_env.clone()));
        }

        self.conversation.push_user(input);
        let reply = self.gateway.reply(&self.conversation).await?;
        self.conversation.push_assistant(reply.clone());
        Ok(reply)
    }

    /// Write the conversation snapshot as pretty JSON
    pub fn export(&self, path: &Path) -> Result<()> {
        let json = self.conversation.to_json()?;
        fs::write(path, json).context(format!("Failed to write chat log to {}", path.display()))?;
        info!(path = %path.display(), "export: wrote chat log");
        Ok(())
    }

    /// Run the REPL main loop
    pub async fn run(&mut self, initial_message: Option<String>) -> Result<()> {
        self.print_welcome();

        // If an initial message was provided, process it first
        if let Some(message) = initial_message {
            println!("{} {}", ">".bright_green(), message);
            self.process_input(&message).await;
        }

        // Create readline editor for proper line editing
        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        // Main REPL loop
        loop {
            let readline = rl.readline(&format!("{} ", ">".bright_green()));

            match readline {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(input);

                    // Handle slash commands
                    if input.starts_with('/') {
                        match self.handle_slash_command(input) {
                            SlashResult::Continue => continue,
                            SlashResult::Quit => break,
                        }
                    } else {
                        self.process_input(input).await;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C - just show new prompt
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D - exit
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Process one user input, printing the reply or the turn error
    async fn process_input(&mut self, input: &str) {
        match self.turn(input).await {
            Ok(reply) => {
                println!();
                println!("{}", reply);
                println!();
            }
            Err(e @ TurnError::MissingApiKey(_)) => {
                println!("{} {}", "!".red(), e);
            }
            Err(TurnError::Service(e)) => {
                println!("{} Service error: {}", "!".red(), e);
            }
        }
    }

    /// Print welcome banner
    fn print_welcome(&self) {
        println!();
        println!("{}", "AI Learning Advisor Agent".bright_cyan().bold());
        println!("一個任務導向的學習輔導 Agent：會主動追問背景 → 分析 → 給出結構化建議。");
        if self.gateway.is_offline() {
            println!(
                "{} No API key configured. Set the {} environment variable before chatting.",
                "!".yellow(),
                self.config.api_key_env.yellow()
            );
        } else {
            println!("Model: {}", self.config.model);
        }
        println!("Type {} for help, {} to quit", "/help".yellow(), "/quit".yellow());
        println!();
        println!("{}", crate::prompts::GREETING);
        println!();
    }

    /// Handle slash commands
    fn handle_slash_command(&mut self, input: &str) -> SlashResult {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts.first().copied().unwrap_or("");

        match cmd {
            "/help" | "/h" => {
                self.print_help();
                SlashResult::Continue
            }
            "/quit" | "/q" | "/exit" => SlashResult::Quit,
            "/reset" | "/r" => {
                self.conversation.reset();
                println!("{}", "Conversation cleared.".dimmed());
                println!();
                println!("{}", crate::prompts::GREETING);
                println!();
                SlashResult::Continue
            }
            "/history" => {
                self.print_history();
                SlashResult::Continue
            }
            "/export" => {
                let path = parts.get(1).copied().unwrap_or(DEFAULT_EXPORT_PATH);
                match self.export(Path::new(path)) {
                    Ok(()) => println!("Chat log written to {}", path.bright_white()),
                    Err(e) => println!("{} Export failed: {}", "!".red(), e),
                }
                SlashResult::Continue
            }
            _ => {
                println!("{} Unknown command: {}", "?".yellow(), cmd);
                println!("Type {} for available commands", "/help".yellow());
                SlashResult::Continue
            }
        }
    }

    /// Print help message
    fn print_help(&self) {
        println!();
        println!("{}", "Available Commands:".bright_cyan());
        println!("  {:16} Show this help", "/help".yellow());
        println!("  {:16} Exit the session", "/quit".yellow());
        println!("  {:16} Clear the conversation and start over", "/reset".yellow());
        println!("  {:16} Show conversation history", "/history".yellow());
        println!("  {:16} Write the chat log as JSON", "/export [PATH]".yellow());
        println!();
    }

    /// Print conversation history (system prompt is not rendered)
    fn print_history(&self) {
        println!();
        println!("{}", "Conversation History:".bright_cyan());
        let mut index = 0;
        for msg in self.conversation.messages() {
            let role = match msg.role {
                Role::System => continue,
                Role::User => "User".bright_green(),
                Role::Assistant => "Assistant".bright_blue(),
            };
            index += 1;
            let preview: String = msg.content.chars().take(50).collect();
            let preview = if msg.content.chars().count() > 50 {
                format!("{}...", preview)
            } else {
                preview
            };
            println!("  {}. {}: {}", index, role, preview);
        }
        println!();
    }
}

/// Result of handling a slash command
enum SlashResult {
    Continue,
    Quit,
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::llm::client::mock::MockLlmClient;
    use crate::prompts::QUOTA_NOTICE;

    fn config_with_key_env(var: &str) -> LlmConfig {
        LlmConfig {
            api_key_env: var.to_string(),
            ..LlmConfig::default()
        }
    }

    #[tokio::test]
    async fn test_turn_without_api_key_is_config_error() {
        let config = config_with_key_env("ADVISOR_TEST_NO_KEY");
        let mut session = ChatSession::with_gateway(config, CompletionGateway::offline());
        let before = session.conversation().len();

        let result = session.turn("hi").await;

        assert!(matches!(result, Err(TurnError::MissingApiKey(_))));
        // Conversation untouched; the session stays usable
        assert_eq!(session.conversation().len(), before);
    }

    #[tokio::test]
    async fn test_successful_turn_appends_user_and_assistant() {
        let config = config_with_key_env("ADVISOR_TEST_KEY_OK");
        unsafe { std::env::set_var("ADVISOR_TEST_KEY_OK", "test-key") };

        let client = Arc::new(MockLlmClient::new(vec![Ok("a study plan".to_string())]));
        let mut session = ChatSession::with_gateway(config, CompletionGateway::new(client));

        let reply = session.turn("我在學線代").await.unwrap();

        assert_eq!(reply, "a study plan");
        let messages = session.conversation().messages();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[2].role, Role::User);
        assert_eq!(messages[2].content, "我在學線代");
        assert_eq!(messages[3].role, Role::Assistant);
        assert_eq!(messages[3].content, "a study plan");
    }

    #[tokio::test]
    async fn test_fatal_failure_retains_orphaned_user_message() {
        let config = config_with_key_env("ADVISOR_TEST_KEY_FATAL");
        unsafe { std::env::set_var("ADVISOR_TEST_KEY_FATAL", "test-key") };

        let client = Arc::new(MockLlmClient::new(vec![Err(LlmError::ApiError {
            status: 500,
            message: "Internal Server Error".to_string(),
        })]));
        let mut session = ChatSession::with_gateway(config, CompletionGateway::new(client));

        let result = session.turn("hi").await;

        assert!(matches!(result, Err(TurnError::Service(_))));
        // The user message stays; no rollback on an aborted turn
        let messages = session.conversation().messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].role, Role::User);
        assert_eq!(messages[2].content, "hi");
    }

    #[tokio::test]
    async fn test_recoverable_failure_completes_the_turn() {
        let config = config_with_key_env("ADVISOR_TEST_KEY_QUOTA");
        unsafe { std::env::set_var("ADVISOR_TEST_KEY_QUOTA", "test-key") };

        let client = Arc::new(MockLlmClient::new(vec![Err(LlmError::RateLimited {
            retry_after_secs: 60,
        })]));
        let mut session = ChatSession::with_gateway(config, CompletionGateway::new(client));

        let reply = session.turn("hi").await.unwrap();

        assert!(reply.starts_with(QUOTA_NOTICE));
        // Turn completed normally: both messages recorded
        assert_eq!(session.conversation().len(), 4);
        assert_eq!(session.conversation().messages()[3].content, reply);
    }

    #[tokio::test]
    async fn test_export_writes_parseable_snapshot() {
        use crate::conversation::Message;

        let config = config_with_key_env("ADVISOR_TEST_KEY_EXPORT");
        unsafe { std::env::set_var("ADVISOR_TEST_KEY_EXPORT", "test-key") };

        let client = Arc::new(MockLlmClient::new(vec![Ok("回覆".to_string())]));
        let mut session = ChatSession::with_gateway(config, CompletionGateway::new(client));
        session.turn("期末考快到了").await.unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat_log.json");
        session.export(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<Message> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, session.conversation().messages());
        assert_eq!(parsed[0].role, Role::System);
    }
}
