//! Dependency installation via the host package manager.

use std::fmt;
use std::path::Path;
use std::process::Stdio;
use std::time::Instant;

use tokio::process::Command;
use tracing::{debug, error, info};

use crate::error::{InstallError, InstallResult};

/// What happens to the package manager's stdout/stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Stream output to this process's terminal.
    Inherit,
    /// Discard output.
    #[default]
    Silent,
}

impl OutputMode {
    fn stdio(self) -> Stdio {
        match self {
            Self::Inherit => Stdio::inherit(),
            Self::Silent => Stdio::null(),
        }
    }
}

/// A package manager invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManager {
    program: String,
    args: Vec<String>,
}

impl PackageManager {
    /// `npm install`, using `npm.cmd` on Windows.
    pub fn npm() -> Self {
        Self {
            program: Self::executable("npm", cfg!(windows)),
            args: vec!["install".to_string()],
        }
    }

    /// An arbitrary program and arguments.
    pub fn custom<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Platform executable name for a package manager.
    pub fn executable(name: &str, windows: bool) -> String {
        if windows {
            format!("{}.cmd", name)
        } else {
            name.to_string()
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Default for PackageManager {
    fn default() -> Self {
        Self::npm()
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Result of a successful install.
#[derive(Debug, Clone)]
pub struct InstallOutcome {
    /// Command line that was run
    pub command: String,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

/// Runs a package manager's install command in a project directory.
#[derive(Debug, Clone, Default)]
pub struct Installer {
    package_manager: PackageManager,
    output: OutputMode,
}

impl Installer {
    pub fn new(package_manager: PackageManager) -> Self {
        Self {
            package_manager,
            output: OutputMode::default(),
        }
    }

    pub fn output(mut self, mode: OutputMode) -> Self {
        self.output = mode;
        self
    }

    pub fn package_manager(&self) -> &PackageManager {
        &self.package_manager
    }

    /// Run the install in `target` and wait for it to exit.
    pub async fn install(&self, target: &Path) -> InstallResult<InstallOutcome> {
        if !target.is_dir() {
            return Err(InstallError::TargetMissing(target.to_path_buf()));
        }

        let command = self.package_manager.to_string();
        info!("Running {} in {:?}", command, target);

        let start = Instant::now();
        let status = Command::new(&self.package_manager.program)
            .args(&self.package_manager.args)
            .current_dir(target)
            .stdin(Stdio::null())
            .stdout(self.output.stdio())
            .stderr(self.output.stdio())
            .status()
            .await
            .map_err(|source| InstallError::SpawnFailed {
                program: self.package_manager.program.clone(),
                source,
            })?;
        let duration_ms = start.elapsed().as_millis() as u64;

        debug!("{} exited with {} after {} ms", command, status, duration_ms);

        if status.success() {
            return Ok(InstallOutcome {
                command,
                duration_ms,
            });
        }

        let err = match status.code() {
            Some(code) => InstallError::Failed { command, code },
            None => InstallError::Terminated { command },
        };
        error!("{}", err);
        Err(err)
    }
}
