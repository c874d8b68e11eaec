mod core;
mod services;
mod ui;

use clap::Parser;
use colored::*;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::services::{Dispatcher, OllamaProcessor, ShellCommandExecutor};
use crate::ui::AgentTerminal;

#[derive(Parser)]
#[command(name = "pi-agent", version)]
#[command(about = "Ask a local Ollama model to answer you or run shell commands for you")]
struct Cli {}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut terminal = match AgentTerminal::new() {
        Ok(terminal) => terminal,
        Err(err) => {
            eprintln!("{} {}", "Error:".red(), err);
            return ExitCode::FAILURE;
        }
    };
    let dispatcher = Dispatcher::new(OllamaProcessor::with_default_config(), ShellCommandExecutor::new());

    match ui::session::run(&mut terminal, &dispatcher).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "Error:".red(), err);
            ExitCode::FAILURE
        }
    }
}
