//! # crt_runner
//!
//! Package manager execution for create-react-template.
//!
//! Runs the host package manager's install command inside a freshly scaffolded
//! project and reports whether it succeeded. There is no retry and no timeout:
//! the child process is awaited until it exits.
//!
//! # Example
//!
//! ```rust,no_run
//! use crt_runner::{Installer, OutputMode, PackageManager};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let installer = Installer::new(PackageManager::npm()).output(OutputMode::Silent);
//!     let outcome = installer.install(Path::new("./my-app")).await?;
//!     println!("{} finished in {} ms", outcome.command, outcome.duration_ms);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod installer;

pub use error::{InstallError, InstallResult};
pub use installer::{InstallOutcome, Installer, OutputMode, PackageManager};
