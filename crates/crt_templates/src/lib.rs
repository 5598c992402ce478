//! # crt_templates
//!
//! Template registry, tree copying, manifest merging and project composition
//! for create-react-template.
//!
//! A project is composed in one sequential pass:
//!
//! - the base template is materialized into a fresh target directory
//! - each selected add-on is overlaid in order, with its `package.json`
//!   deep-merged into the project's instead of overwriting it
//! - placeholder files (`*.ejs`) are rendered and stripped of their suffix
//!
//! ## Example
//!
//! ```rust,no_run
//! use crt_templates::{
//!     ComposeOptions, Composer, RegistryLoader, TemplateRequest, TemplateResolver,
//!     TemplateSource,
//! };
//! # use crt_templates::{Category, TemplateRegistry, TemplateResult, TemplateSelector};
//! # struct NoPrompt;
//! # impl TemplateSelector for NoPrompt {
//! #     fn select_category(&mut self, _: &[Category]) -> TemplateResult<String> { unreachable!() }
//! #     fn select_template(&mut self, _: &Category, _: &TemplateRegistry) -> TemplateResult<String> { unreachable!() }
//! # }
//! use std::path::Path;
//!
//! let registry = RegistryLoader::new("templates").load().unwrap();
//! let resolver = TemplateResolver::new(&registry);
//! let template = resolver
//!     .resolve(&TemplateRequest::new(Some("ts"), Some("tw")), &mut NoPrompt)
//!     .unwrap();
//!
//! let composer = Composer::new("templates");
//! let options = ComposeOptions::for_project("my-app").with_addon("shadcn");
//! let report = composer
//!     .scaffold(
//!         Path::new("./my-app"),
//!         &TemplateSource::local("templates"),
//!         &template,
//!         &options,
//!     )
//!     .unwrap();
//! println!("wrote {} files", report.created_files.len());
//! ```

pub mod composer;
pub mod copier;
pub mod error;
pub mod loader;
pub mod manifest;
pub mod registry;
pub mod renderer;
pub mod resolver;
pub mod source;

pub use composer::{
    is_valid_addon_id, AddonOutcome, ComposeOptions, Composer, ProgressHandler, ScaffoldReport,
    ScaffoldStep, ADDONS_DIR,
};
pub use copier::{copy_tree, copy_tree_filtered};
pub use error::{TemplateError, TemplateResult};
pub use loader::{RegistryLoader, REGISTRY_FILE};
pub use manifest::{
    merge_manifest_files, merge_manifests, read_manifest, to_manifest_string, write_manifest,
    MANIFEST_FILE,
};
pub use registry::{AddOn, Category, TemplateRegistry};
pub use renderer::{PlaceholderRenderer, RenderContext, PLACEHOLDER_SUFFIX};
pub use resolver::{
    is_valid_project_name, TemplateId, TemplateRequest, TemplateResolver,
    TemplateSelector, DEFAULT_PROJECT_NAME, PROJECT_NAME_RULE,
};
pub use source::{clone_url, TemplateSource, DEFAULT_REPOSITORY};
