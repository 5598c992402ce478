//! Project composition.
//!
//! The composer runs the scaffold steps strictly in order:
//!
//! 1. materialize the base template into a fresh target directory
//! 2. overlay each selected add-on (all files except `package.json`), then
//!    merge the add-on's `package.json` into the project's
//! 3. render placeholder files
//!
//! The first failing step aborts the scaffold. Files already written stay in
//! the target directory.

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::copier::copy_tree_filtered;
use crate::error::{TemplateError, TemplateResult};
use crate::manifest::{merge_manifest_files, MANIFEST_FILE};
use crate::renderer::{PlaceholderRenderer, RenderContext};
use crate::resolver::TemplateId;
use crate::source::TemplateSource;

/// Directory under the template root holding add-on trees.
pub const ADDONS_DIR: &str = "addons";

/// A scaffold step, reported to the progress handler before it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaffoldStep {
    CopyingBase(String),
    ApplyingAddon(String),
    RenderingPlaceholders,
}

impl fmt::Display for ScaffoldStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CopyingBase(template) => write!(f, "Copying {}...", template),
            Self::ApplyingAddon(addon) => write!(f, "Adding {}...", addon),
            Self::RenderingPlaceholders => write!(f, "Rendering templates..."),
        }
    }
}

/// Whether `addon` names a single directory under the add-ons root.
pub fn is_valid_addon_id(addon: &str) -> bool {
    let mut components = Path::new(addon).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !addon.contains(['/', '\\'])
}

/// Progress callback type.
pub type ProgressHandler = Arc<dyn Fn(&ScaffoldStep) + Send + Sync>;

/// Options for a scaffold run.
#[derive(Debug, Clone, Default)]
pub struct ComposeOptions {
    /// Add-ons to apply, in order.
    pub addons: Vec<String>,
    /// Whether to render placeholder files after the overlay.
    pub render_placeholders: bool,
    /// Data substituted into placeholder files.
    pub context: RenderContext,
}

impl ComposeOptions {
    pub fn new() -> Self {
        Self {
            render_placeholders: true,
            ..Self::default()
        }
    }

    /// Options with the standard render context for `project_name`.
    pub fn for_project(project_name: &str) -> Self {
        Self {
            context: RenderContext::for_project(project_name, &[]),
            ..Self::new()
        }
    }

    pub fn with_addon(mut self, addon: impl Into<String>) -> Self {
        self.addons.push(addon.into());
        self.refresh_context();
        self
    }

    pub fn with_addons<I, S>(mut self, addons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.addons.extend(addons.into_iter().map(Into::into));
        self.refresh_context();
        self
    }

    pub fn render_placeholders(mut self, enabled: bool) -> Self {
        self.render_placeholders = enabled;
        self
    }

    pub fn with_context(mut self, context: RenderContext) -> Self {
        self.context = context;
        self
    }

    fn refresh_context(&mut self) {
        self.context.set_addons(&self.addons);
    }
}

/// Outcome of applying a single add-on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddonOutcome {
    Applied {
        files: Vec<PathBuf>,
        manifest_merged: bool,
    },
    Missing(PathBuf),
}

/// What a scaffold run did.
#[derive(Debug, Default)]
pub struct ScaffoldReport {
    pub target_path: PathBuf,
    /// Files written by the base copy and add-on overlays.
    pub created_files: Vec<PathBuf>,
    pub applied_addons: Vec<String>,
    pub skipped_addons: Vec<String>,
    /// Output paths of rendered placeholder files.
    pub rendered_files: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

/// Composes projects from a base template and add-ons.
pub struct Composer {
    templates_path: PathBuf,
    renderer: PlaceholderRenderer,
    progress: Option<ProgressHandler>,
}

impl Composer {
    /// Create a composer reading add-ons from `templates_path/addons`.
    pub fn new(templates_path: impl Into<PathBuf>) -> Self {
        Self {
            templates_path: templates_path.into(),
            renderer: PlaceholderRenderer::new(),
            progress: None,
        }
    }

    /// Set a handler notified before each step.
    pub fn with_progress(mut self, handler: ProgressHandler) -> Self {
        self.progress = Some(handler);
        self
    }

    /// Directory of an add-on.
    pub fn addon_path(&self, addon: &str) -> PathBuf {
        self.templates_path.join(ADDONS_DIR).join(addon)
    }

    /// Whether the template root has an add-ons directory at all.
    pub fn has_addons(&self) -> bool {
        self.templates_path.join(ADDONS_DIR).is_dir()
    }

    /// Compose a new project at `target`.
    ///
    /// `target` must not exist yet.
    pub fn scaffold(
        &self,
        target: &Path,
        source: &TemplateSource,
        template: &TemplateId,
        options: &ComposeOptions,
    ) -> TemplateResult<ScaffoldReport> {
        if target.exists() {
            return Err(TemplateError::AlreadyExists(target.to_path_buf()));
        }

        info!("Scaffolding {} into {:?}", template, target);

        let mut report = ScaffoldReport {
            target_path: target.to_path_buf(),
            ..ScaffoldReport::default()
        };

        self.notify(&ScaffoldStep::CopyingBase(template.to_string()));
        report.created_files = source.materialize(template, target)?;

        for addon in &options.addons {
            self.notify(&ScaffoldStep::ApplyingAddon(addon.clone()));
            match self.apply_addon(target, addon)? {
                AddonOutcome::Applied { files, .. } => {
                    report.created_files.extend(files);
                    report.applied_addons.push(addon.clone());
                }
                AddonOutcome::Missing(_) => {
                    report.skipped_addons.push(addon.clone());
                    report
                        .warnings
                        .push(format!("Add-on \"{}\" not found locally.", addon));
                }
            }
        }

        if options.render_placeholders {
            self.notify(&ScaffoldStep::RenderingPlaceholders);
            report.rendered_files = self.renderer.render_tree(target, &options.context)?;
        }

        info!(
            "Scaffolded {} files ({} add-ons applied, {} skipped)",
            report.created_files.len(),
            report.applied_addons.len(),
            report.skipped_addons.len()
        );
        Ok(report)
    }

    /// Overlay one add-on onto an existing project directory.
    ///
    /// A missing add-on directory is not an error: it is logged and reported
    /// as [`AddonOutcome::Missing`]. So is an id that is not a plain
    /// directory name (empty, `..`, or containing a path separator).
    pub fn apply_addon(&self, target: &Path, addon: &str) -> TemplateResult<AddonOutcome> {
        let addon_path = self.addon_path(addon);

        if !is_valid_addon_id(addon) {
            debug!("Add-on id {:?} is not a directory name", addon);
            return Ok(AddonOutcome::Missing(addon_path));
        }
        if !addon_path.is_dir() {
            debug!("Add-on \"{}\" not found at {:?}", addon, addon_path);
            return Ok(AddonOutcome::Missing(addon_path));
        }

        let files = copy_tree_filtered(&addon_path, target, |name| name == MANIFEST_FILE)?;
        let manifest_merged =
            merge_manifest_files(&target.join(MANIFEST_FILE), &addon_path.join(MANIFEST_FILE))?;

        info!("Applied add-on {} ({} files)", addon, files.len());
        Ok(AddonOutcome::Applied {
            files,
            manifest_merged,
        })
    }

    fn notify(&self, step: &ScaffoldStep) {
        if let Some(handler) = &self.progress {
            handler(step);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_options_builder() {
        let options = ComposeOptions::for_project("demo")
            .with_addon("tailwind")
            .with_addons(["shadcn"]);

        assert_eq!(options.addons, vec!["tailwind", "shadcn"]);
        assert!(options.render_placeholders);
        assert_eq!(options.context.get("projectName"), Some("demo"));
        assert_eq!(options.context.get("addons"), Some("tailwind,shadcn"));
        assert_eq!(options.context.get("has_shadcn"), None);
    }

    #[test]
    fn test_render_can_be_disabled() {
        let options = ComposeOptions::new().render_placeholders(false);
        assert!(!options.render_placeholders);
        assert!(options.addons.is_empty());
    }

    #[test]
    fn test_step_messages() {
        assert_eq!(
            ScaffoldStep::ApplyingAddon("tailwind".into()).to_string(),
            "Adding tailwind..."
        );
    }

    #[test]
    fn test_addon_ids() {
        for id in ["tailwind", "tw-shadcn", "ui.kit"] {
            assert!(is_valid_addon_id(id), "{id} should be valid");
        }
        for id in ["", ".", "..", "../ts", "a/b", "a\\b", "/abs", "addons/"] {
            assert!(!is_valid_addon_id(id), "{id:?} should be rejected");
        }
    }

    #[test]
    fn test_addon_path() {
        let composer = Composer::new("/opt/templates");
        assert_eq!(
            composer.addon_path("shadcn"),
            PathBuf::from("/opt/templates/addons/shadcn")
        );
    }
}
