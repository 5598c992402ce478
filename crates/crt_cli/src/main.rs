//! create-react-template CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success, cancelled by the user, or dependency install failed
//! - 1: Error (existing directory, missing template, fetch failure, ...)
//! - 2: Invalid arguments (reported by clap)

use std::process::ExitCode;

use clap::Parser;
use console::{style, Term};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crt_cli::commands::{self, Cli};
use crt_cli::output::Ui;
use crt_cli::CreateOutcome;

/// Process exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(&cli);
    spawn_interrupt_handler(cli.quiet);

    match commands::create::execute(cli.clone()).await {
        Ok(CreateOutcome::Created(project)) => {
            tracing::debug!(
                "Created {} with {} files",
                project.target_path.display(),
                project.report.created_files.len()
            );
            ExitCode::from(ExitCodes::SUCCESS)
        }
        Ok(CreateOutcome::Cancelled) => {
            let _ = Term::stderr().show_cursor();
            Ui::new(cli.quiet).cancelled();
            ExitCode::from(ExitCodes::SUCCESS)
        }
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), e);
            ExitCode::from(ExitCodes::GENERAL_ERROR)
        }
    }
}

/// Treat Ctrl+C as a cancellation: restore the cursor and exit cleanly.
///
/// Prompts read the terminal in raw mode and re-raise SIGINT themselves, so
/// this also covers Ctrl+C inside a prompt.
fn spawn_interrupt_handler(quiet: bool) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = Term::stderr().show_cursor();
            Ui::new(quiet).cancelled();
            std::process::exit(i32::from(ExitCodes::SUCCESS));
        }
    });
}

/// Log to stderr, `RUST_LOG` first; `-v` turns on debug for our crates.
fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        "crt_cli=debug,crt_templates=debug,crt_runner=debug,warn"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(cli.verbose).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if log_result.is_err() {
        // Already initialized
    }
}
