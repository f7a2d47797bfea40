use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// roledoc - Ansible role documentation generator
///
/// Analyzes the structure of an Ansible role and writes a Markdown document
/// covering its metadata, directory layout, variables, tasks, handlers,
/// supported platforms, dependencies and an example playbook.
#[derive(Parser, Debug)]
#[command(name = "roledoc")]
#[command(about = "Generate Markdown documentation for an Ansible role")]
#[command(version)]
pub struct Cli {
    /// Path to the Ansible role directory to analyze
    pub role_directory: PathBuf,

    /// Output path for the generated documentation
    /// (default: DOCUMENTATION.md in the role directory)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Directory for storing log files
    #[arg(
        short,
        long = "logs",
        value_name = "DIR",
        default_value = "logs",
        env = "ROLEDOC_LOG_DIR"
    )]
    pub logs: PathBuf,

    /// Increase verbosity level (can be used multiple times)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Leave the generation timestamp out of the report, so identical
    /// inputs produce byte-identical output
    #[arg(long)]
    pub no_timestamp: bool,
}

impl Cli {
    /// Parse the process arguments, exiting with a usage error if invalid
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
