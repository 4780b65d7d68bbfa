//! altdoc CLI - local entry point for the document classification and
//! extraction pipeline.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Command};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(2);
        }
    }
}

async fn run() -> anyhow::Result<bool> {
    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Process(args) => commands::execute_process(args, config, cli.json).await,
        Command::Classify(args) => {
            commands::execute_classify(args, config, cli.json).await?;
            Ok(true)
        }
    }
}
