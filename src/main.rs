//! Learning advisor CLI entry point

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use eyre::{Context, Result};
use tracing::info;

use advisor::cli::{Cli, Command};
use advisor::config::Config;
use advisor::session::ChatSession;

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("advisor")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Write to a log file, not stdout/stderr - the chat session owns the terminal
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("advisor.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Loaded config: model={}", config.llm.model);

    match cli.command {
        Command::Chat { initial_message, model } => cmd_chat(config, initial_message, model).await,
        Command::Ask { text, model } => cmd_ask(config, text, model).await,
    }
}

/// Run the interactive chat session
async fn cmd_chat(mut config: Config, initial_message: Option<String>, model: Option<String>) -> Result<()> {
    if let Some(model) = model {
        config.llm.model = model;
    }

    let mut session = ChatSession::new(config.llm)?;
    session.run(initial_message).await
}

/// Run a single turn and print the reply
async fn cmd_ask(mut config: Config, text: String, model: Option<String>) -> Result<()> {
    if let Some(model) = model {
        config.llm.model = model;
    }

    let mut session = ChatSession::new(config.llm)?;
    let reply = session.turn(&text).await?;
    println!("{}", reply);
    Ok(())
}
