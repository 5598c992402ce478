//! create-react-template CLI library.
//!
//! The binary is a thin wrapper around [`commands::create::execute`]; the
//! pieces are exposed here so the whole flow can be driven with a scripted
//! [`prompt::Prompter`] in tests.

pub mod commands;
pub mod config;
pub mod output;
pub mod prompt;

pub use commands::create::{CreateOutcome, CreatedProject, InstallStatus};
pub use commands::Cli;
pub use config::{InstallChoice, Settings};
pub use prompt::{DialoguerPrompter, Prompter};
