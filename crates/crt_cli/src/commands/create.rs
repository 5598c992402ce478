//! Create command - scaffold a new project.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use console::style;
use tracing::{info, warn};

use crt_runner::{Installer, PackageManager};
use crt_templates::{
    is_valid_project_name, ComposeOptions, Composer, RegistryLoader, ScaffoldReport,
    ScaffoldStep, TemplateError, TemplateRegistry, TemplateRequest, TemplateResolver,
    PROJECT_NAME_RULE,
};

use super::Cli;
use crate::config::{InstallChoice, Settings};
use crate::output::Ui;
use crate::prompt::{DialoguerPrompter, Prompter};

/// Result of the dependency install step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallStatus {
    Skipped,
    Installed,
    Failed(String),
}

/// A successfully scaffolded project.
#[derive(Debug)]
pub struct CreatedProject {
    pub project_name: String,
    pub target_path: PathBuf,
    pub report: ScaffoldReport,
    pub install: InstallStatus,
}

/// How a run ended without error.
#[derive(Debug)]
pub enum CreateOutcome {
    Created(CreatedProject),
    /// The user declined a prompt.
    Cancelled,
}

/// Run the command with terminal prompts and `npm install`.
pub async fn execute(cli: Cli) -> Result<CreateOutcome> {
    let settings = Settings::from_cli(&cli)?;
    let installer = Installer::new(PackageManager::npm()).output(settings.install_output);
    let mut prompter = DialoguerPrompter::new();

    execute_with(&cli, &settings, &mut prompter, &installer).await
}

/// Run the command with explicit settings, prompts and installer.
pub async fn execute_with<P>(
    cli: &Cli,
    settings: &Settings,
    prompter: &mut P,
    installer: &Installer,
) -> Result<CreateOutcome>
where
    P: Prompter + ?Sized,
{
    match run(cli, settings, prompter, installer).await {
        Err(e) if matches!(e.downcast_ref::<TemplateError>(), Some(TemplateError::Cancelled)) => {
            info!("Cancelled by user");
            Ok(CreateOutcome::Cancelled)
        }
        other => other,
    }
}

async fn run<P>(
    cli: &Cli,
    settings: &Settings,
    prompter: &mut P,
    installer: &Installer,
) -> Result<CreateOutcome>
where
    P: Prompter + ?Sized,
{
    let ui = Ui::new(settings.quiet);
    ui.intro();

    let registry = RegistryLoader::new(&settings.templates_dir)
        .load()
        .context("Failed to load template registry")?;

    // Project name
    let project_name = match cli.project_name.as_deref() {
        Some(name) if is_valid_project_name(name) => name.to_string(),
        Some(name) => {
            ui.warn(&format!("Invalid project name '{}'. {}", name, PROJECT_NAME_RULE));
            prompter.project_name()?
        }
        None => prompter.project_name()?,
    };

    let target_path = settings.working_dir.join(&project_name);
    if target_path.exists() {
        anyhow::bail!("Directory {} already exists.", project_name);
    }

    // Template
    let request = template_request(cli, &registry);
    let template = TemplateResolver::new(&registry).resolve(&request, prompter)?;
    info!("Using template {} from {}", template, settings.source.describe(&template));

    // Add-ons
    let composer = Composer::new(&settings.templates_dir);
    let addons = if !cli.addons.is_empty() {
        cli.addons.clone()
    } else if composer.has_addons() && !registry.addons.is_empty() {
        prompter.select_addons(&registry.addons)?
    } else {
        Vec::new()
    };

    // Scaffold
    let spinner = ui.spinner(format!(
        "Scaffolding project in {}",
        style(target_path.display()).cyan()
    ));
    let progress = spinner.clone();
    let composer = composer.with_progress(Arc::new(move |step: &ScaffoldStep| {
        progress.set_message(step.to_string());
    }));
    let options = ComposeOptions::for_project(&project_name)
        .with_addons(addons)
        .render_placeholders(settings.render_placeholders);

    let report = match composer.scaffold(&target_path, &settings.source, &template, &options) {
        Ok(report) => {
            spinner.finish_and_clear();
            ui.success("Scaffolding complete.");
            report
        }
        Err(e) => {
            spinner.finish_and_clear();
            ui.error("Scaffolding failed.");
            return Err(e).with_context(|| {
                format!(
                    "Failed to scaffold {} from {}",
                    project_name,
                    settings.source.describe(&template)
                )
            });
        }
    };

    for warning in &report.warnings {
        ui.warn(warning);
    }

    // Dependencies
    let should_install = match settings.install {
        InstallChoice::Always => true,
        InstallChoice::Never => false,
        InstallChoice::Ask => prompter.confirm_install()?,
    };

    let install = if should_install {
        let spinner = ui.spinner("Installing dependencies...");
        match installer.install(&target_path).await {
            Ok(outcome) => {
                spinner.finish_and_clear();
                ui.success("Dependencies installed.");
                info!("{} finished in {} ms", outcome.command, outcome.duration_ms);
                InstallStatus::Installed
            }
            Err(e) => {
                spinner.finish_and_clear();
                ui.error("Dependency installation failed.");
                ui.error(&e.to_string());
                warn!("Install failed: {}", e);
                InstallStatus::Failed(e.to_string())
            }
        }
    } else {
        InstallStatus::Skipped
    };

    ui.next_steps(&project_name, install != InstallStatus::Installed);

    Ok(CreateOutcome::Created(CreatedProject {
        project_name,
        target_path,
        report,
        install,
    }))
}

/// Build the resolver request from the category flag, if any.
///
/// `--category` accepts a category value or its flag without the dashes.
fn template_request(cli: &Cli, registry: &TemplateRegistry) -> TemplateRequest {
    let Some((given, template)) = cli.category_flag() else {
        return TemplateRequest::default();
    };

    let category = registry
        .category_by_flag(given)
        .or_else(|| registry.category(given))
        .or_else(|| registry.category_by_flag(&format!("--{}", given)));

    match category {
        Some(category) => TemplateRequest::new(Some(category.value.as_str()), template),
        None => {
            warn!("No template category is registered for {}", given);
            TemplateRequest::new(None, template)
        }
    }
}
