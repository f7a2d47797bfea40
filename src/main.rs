//! roledoc - main entry point
//!
//! Parses arguments, sets up logging and runs the generator. Exit status is
//! zero whenever a report was written, warnings included.

use std::process::ExitCode;

use anyhow::Context;
use chrono::Local;
use tracing::{debug, error, info};

use roledoc::cli::Cli;
use roledoc::config::DocgenConfig;
use roledoc::error::{DocgenError, EXIT_IO_FAILURE, EXIT_SUCCESS};
use roledoc::generator::{DocGenerator, RunOutcome};
use roledoc::logging;

fn main() -> ExitCode {
    // Usage errors exit here with clap's status 2
    let cli = Cli::parse_args();
    let config = DocgenConfig::from_cli(&cli);

    let started = Local::now().naive_local();
    let log_file = logging::init_logging(&config, started);
    info!("roledoc {} starting", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &log_file {
        debug!("Logging to {}", path.display());
    }

    match run(config) {
        Ok(outcome) => {
            println!("✓ Documentation written to {}", outcome.output_path.display());
            if !outcome.warnings.is_empty() {
                let hint = log_file
                    .as_ref()
                    .map(|p| format!(", see {}", p.display()))
                    .unwrap_or_default();
                println!("  {} warning(s){}", outcome.warnings.len(), hint);
            }
            exit_status(EXIT_SUCCESS)
        }
        Err(e) => {
            error!("{:#}", e);
            eprintln!("✗ Error: {:#}", e);
            let code = e
                .downcast_ref::<DocgenError>()
                .map(DocgenError::exit_code)
                .unwrap_or(EXIT_IO_FAILURE);
            exit_status(code)
        }
    }
}

fn exit_status(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn run(config: DocgenConfig) -> anyhow::Result<RunOutcome> {
    let generator = DocGenerator::new(config);
    generator.run().with_context(|| {
        format!(
            "failed to document role {}",
            generator.config().role_dir.display()
        )
    })
}
