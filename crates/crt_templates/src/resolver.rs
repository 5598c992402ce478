//! Template source resolution.
//!
//! Turns a (possibly partial) category/template request into a concrete
//! template identifier. Missing or unknown pieces are filled in through a
//! [`TemplateSelector`], which is the interactive prompt in the CLI.

use std::fmt;

use tracing::{debug, warn};

use crate::error::{TemplateError, TemplateResult};
use crate::registry::{Category, TemplateRegistry};

/// Project name used when the user accepts the prompt default.
pub const DEFAULT_PROJECT_NAME: &str = "my-project";

/// Message shown when a project name fails validation.
pub const PROJECT_NAME_RULE: &str =
    "Project name may only include letters, numbers, underscores, hashes and dots.";

/// Whether `name` only uses letters, digits, `-`, `_` and `.`.
pub fn is_valid_project_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// A resolved template: a category plus one of its declared templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateId {
    category: String,
    name: String,
    path: String,
}

impl TemplateId {
    fn new(category: &Category, name: &str) -> Self {
        let prefix = category.path.trim_end_matches('/');
        let path = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", prefix, name)
        };
        Self {
            category: category.value.clone(),
            name: name.to_string(),
            path,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Relative, `/`-separated path of the template inside a template tree.
    pub fn as_path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}

/// What the caller already knows about the wanted template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateRequest {
    pub category: Option<String>,
    pub template: Option<String>,
}

impl TemplateRequest {
    pub fn new(category: Option<&str>, template: Option<&str>) -> Self {
        Self {
            category: category.map(String::from),
            template: template.map(String::from),
        }
    }
}

/// Source of interactive choices during resolution.
pub trait TemplateSelector {
    /// Pick a category; returns its `value`.
    fn select_category(&mut self, categories: &[Category]) -> TemplateResult<String>;

    /// Pick a template within `category`; returns its name.
    fn select_template(
        &mut self,
        category: &Category,
        registry: &TemplateRegistry,
    ) -> TemplateResult<String>;
}

/// Resolves template requests against a registry.
pub struct TemplateResolver<'a> {
    registry: &'a TemplateRegistry,
}

impl<'a> TemplateResolver<'a> {
    pub fn new(registry: &'a TemplateRegistry) -> Self {
        Self { registry }
    }

    /// Resolve a request, asking `selector` for whatever is missing or unknown.
    pub fn resolve<S>(&self, request: &TemplateRequest, selector: &mut S) -> TemplateResult<TemplateId>
    where
        S: TemplateSelector + ?Sized,
    {
        let category = match request
            .category
            .as_deref()
            .and_then(|value| self.registry.category(value))
        {
            Some(category) => category,
            None => {
                if let Some(unknown) = &request.category {
                    warn!("Unknown template category '{}'", unknown);
                }
                let value = selector.select_category(&self.registry.categories)?;
                self.registry
                    .category(&value)
                    .ok_or_else(|| TemplateError::NotFound(format!("category '{}'", value)))?
            }
        };

        let requested = request
            .template
            .as_deref()
            .filter(|name| !name.is_empty());

        let name = match requested {
            Some(name) if category.has_template(name) => name.to_string(),
            other => {
                if let Some(unknown) = other {
                    warn!(
                        "Template '{}' is not available for {}",
                        unknown, category.name
                    );
                }
                let selected = selector.select_template(category, self.registry)?;
                if !category.has_template(&selected) {
                    return Err(TemplateError::NotFound(format!(
                        "{}/{}",
                        category.path, selected
                    )));
                }
                selected
            }
        };

        let id = TemplateId::new(category, &name);
        debug!("Resolved template {}", id);
        Ok(id)
    }
}
