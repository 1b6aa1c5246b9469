//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Learning advisor chat agent
#[derive(Parser)]
#[command(
    name = "adv",
    about = "Task-oriented learning advisor: asks for background first, then produces a structured study plan",
    version,
    after_help = "Logs are written to: ~/.local/share/advisor/logs/advisor.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Start an interactive chat session
    Chat {
        /// First message to send before the prompt appears
        initial_message: Option<String>,

        /// Override the configured model identifier
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Ask a single question and print the reply (one-shot turn)
    Ask {
        /// The question or situation description
        text: String,

        /// Override the configured model identifier
        #[arg(short, long)]
        model: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_chat() {
        let cli = Cli::parse_from(["adv", "chat"]);
        assert!(matches!(
            cli.command,
            Command::Chat {
                initial_message: None,
                model: None
            }
        ));
    }

    #[test]
    fn test_cli_parse_chat_with_initial_message() {
        let cli = Cli::parse_from(["adv", "chat", "我在學 OS"]);
        match cli.command {
            Command::Chat { initial_message, .. } => {
                assert_eq!(initial_message.as_deref(), Some("我在學 OS"));
            }
            _ => panic!("Expected chat command"),
        }
    }

    #[test]
    fn test_cli_parse_ask_with_model_override() {
        let cli = Cli::parse_from(["adv", "ask", "hi", "--model", "gpt-4o"]);
        match cli.command {
            Command::Ask { text, model } => {
                assert_eq!(text, "hi");
                assert_eq!(model.as_deref(), Some("gpt-4o"));
            }
            _ => panic!("Expected ask command"),
        }
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["adv"]).is_err());
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::parse_from(["adv", "chat", "--verbose", "--config", "custom.yml"]);
        assert!(cli.verbose);
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("custom.yml")));
    }
}
