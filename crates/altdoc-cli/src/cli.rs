//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// altdoc - classify and extract alternative-investment documents.
#[derive(Debug, Parser)]
#[command(name = "altdoc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Pipeline configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit JSON instead of human-readable summaries
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run documents through the full pipeline
    Process(ProcessArgs),

    /// Classify documents without extracting fields
    Classify(ClassifyArgs),
}

/// Arguments for the process command.
#[derive(Debug, Parser)]
pub struct ProcessArgs {
    /// Text files to process, one document per file
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

/// Arguments for the classify command.
#[derive(Debug, Parser)]
pub struct ClassifyArgs {
    /// Text files to classify, one document per file
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}
