//! Console output: banner, spinners, and next steps.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

static CANCEL_REPORTED: AtomicBool = AtomicBool::new(false);

/// Console writer honouring `--quiet`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ui {
    quiet: bool,
}

impl Ui {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn intro(&self) {
        if self.quiet {
            return;
        }
        println!(
            "{}{}",
            style(" create-react-template ").black().on_cyan(),
            style(" (Ctrl+C to cancel)").dim()
        );
        println!();
    }

    /// Start a spinner; hidden in quiet mode.
    pub fn spinner(&self, message: impl Into<String>) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(spinner_style);
        }
        spinner.set_message(message.into());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✓").green().bold(), message);
        }
    }

    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", style("Warning:").yellow().bold(), style(message).yellow());
    }

    pub fn error(&self, message: &str) {
        eprintln!("{}", style(message).red());
    }

    /// Report cancellation; returns `false` if it was already reported.
    ///
    /// Both the Ctrl+C handler and the prompt path may get here for the same
    /// keypress.
    pub fn cancelled(&self) -> bool {
        if CANCEL_REPORTED.swap(true, Ordering::SeqCst) {
            return false;
        }
        eprintln!("{}", style("Operation cancelled.").dim());
        true
    }

    /// Closing banner and the commands to run next.
    pub fn next_steps(&self, project_name: &str, needs_install: bool) {
        if self.quiet {
            return;
        }
        println!();
        println!("{}", style("You're all set!").green().bold());
        println!();
        println!("  {}", style("Run the following commands to get started:").dim());
        println!();
        println!("    {} {}", style("cd").cyan(), project_name);
        if needs_install {
            println!("    {}", style("npm install").cyan());
        }
        println!("    {}", style("npm run dev").cyan());
        println!();
    }
}
