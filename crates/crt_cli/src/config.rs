//! Runtime settings derived from the command line and environment.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crt_runner::OutputMode;
use crt_templates::TemplateSource;

use crate::commands::Cli;

/// Whether to install dependencies after scaffolding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallChoice {
    Ask,
    Always,
    Never,
}

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory the project is created in
    pub working_dir: PathBuf,
    /// Local template root (add-ons, registry file, `--local` bases)
    pub templates_dir: PathBuf,
    /// Where the base template comes from
    pub source: TemplateSource,
    pub render_placeholders: bool,
    pub install: InstallChoice,
    pub install_output: OutputMode,
    pub quiet: bool,
}

impl Settings {
    /// Settings for the current process.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let working_dir = std::env::current_dir().context("Failed to read current directory")?;
        Ok(Self::resolve(cli, working_dir, default_templates_dir()))
    }

    /// Settings for `cli`, creating projects under `working_dir`.
    ///
    /// `fallback_templates_dir` is used when neither `--templates-dir` nor
    /// `CRT_TEMPLATES_DIR` is set.
    pub fn resolve(cli: &Cli, working_dir: impl Into<PathBuf>, fallback_templates_dir: PathBuf) -> Self {
        let working_dir = working_dir.into();
        let templates_dir = cli
            .templates_dir
            .as_deref()
            .map(|dir| absolutize(&working_dir, dir))
            .unwrap_or(fallback_templates_dir);

        let source = if cli.local {
            TemplateSource::local(&templates_dir)
        } else {
            TemplateSource::remote(cli.repo.clone())
        };

        let install = if cli.install {
            InstallChoice::Always
        } else if cli.skip_install {
            InstallChoice::Never
        } else {
            InstallChoice::Ask
        };

        let install_output = if cli.show_install_output {
            OutputMode::Inherit
        } else {
            OutputMode::Silent
        };

        Self {
            working_dir,
            templates_dir,
            source,
            render_placeholders: !cli.no_render,
            install,
            install_output,
            quiet: cli.quiet,
        }
    }
}

/// `templates/` next to the executable.
fn default_templates_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("templates")))
        .unwrap_or_else(|| PathBuf::from("templates"))
}

fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn settings(args: &[&str]) -> Settings {
        let mut argv = vec!["create-react-template", "--repo", "acme/templates"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        Settings::resolve(&cli, "/work", PathBuf::from("/opt/crt/templates"))
    }

    #[test]
    fn test_defaults() {
        let settings = settings(&["my-app"]);
        assert_eq!(settings.source, TemplateSource::remote("acme/templates"));
        assert_eq!(settings.install, InstallChoice::Ask);
        assert_eq!(settings.install_output, OutputMode::Silent);
        assert!(settings.render_placeholders);
    }

    #[test]
    fn test_local_uses_templates_dir() {
        let settings = settings(&["my-app", "--local", "--templates-dir", "tpl"]);
        assert_eq!(settings.templates_dir, PathBuf::from("/work/tpl"));
        assert_eq!(settings.source, TemplateSource::local("/work/tpl"));
    }

    #[test]
    fn test_local_falls_back_to_default_dir() {
        let mut cli = Cli::try_parse_from(["create-react-template", "--local", "my-app"]).unwrap();
        cli.templates_dir = None;

        let settings = Settings::resolve(&cli, "/work", PathBuf::from("/opt/crt/templates"));
        assert_eq!(settings.source, TemplateSource::local("/opt/crt/templates"));
    }

    #[test]
    fn test_install_flags() {
        assert_eq!(settings(&["--install"]).install, InstallChoice::Always);
        assert_eq!(settings(&["--skip-install"]).install, InstallChoice::Never);
        assert_eq!(
            settings(&["--show-install-output"]).install_output,
            OutputMode::Inherit
        );
        assert!(!settings(&["--no-render"]).render_placeholders);
    }
}
