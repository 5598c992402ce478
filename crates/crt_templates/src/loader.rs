//! Template registry loading.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{TemplateError, TemplateResult};
use crate::registry::TemplateRegistry;

/// File name of a registry override at the root of a local template tree.
pub const REGISTRY_FILE: &str = "templates.yaml";

/// Loads the template registry for a template root.
pub struct RegistryLoader {
    templates_path: PathBuf,
}

impl RegistryLoader {
    /// Create a new registry loader.
    pub fn new(templates_path: impl Into<PathBuf>) -> Self {
        Self {
            templates_path: templates_path.into(),
        }
    }

    /// Load the registry.
    ///
    /// A `templates.yaml` (or `templates.yml`) at the template root replaces the
    /// built-in catalogue; otherwise the built-in catalogue is returned.
    pub fn load(&self) -> TemplateResult<TemplateRegistry> {
        match self.registry_file() {
            Some(path) => {
                let registry = self.load_file(&path)?;
                info!(
                    "Loaded template registry from {:?} ({} categories)",
                    path,
                    registry.categories.len()
                );
                Ok(registry)
            }
            None => {
                debug!(
                    "No registry file in {:?}, using built-in templates",
                    self.templates_path
                );
                Ok(TemplateRegistry::builtin())
            }
        }
    }

    fn registry_file(&self) -> Option<PathBuf> {
        [REGISTRY_FILE, "templates.yml"]
            .iter()
            .map(|name| self.templates_path.join(name))
            .find(|path| path.is_file())
    }

    fn load_file(&self, path: &Path) -> TemplateResult<TemplateRegistry> {
        let content = fs::read_to_string(path)?;
        let registry: TemplateRegistry =
            serde_yaml::from_str(&content).map_err(|e| TemplateError::InvalidRegistry {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        if registry.categories.is_empty() {
            return Err(TemplateError::InvalidRegistry {
                path: path.to_path_buf(),
                message: "no categories declared".to_string(),
            });
        }

        if let Some(category) = registry.categories.iter().find(|c| c.templates.is_empty()) {
            return Err(TemplateError::InvalidRegistry {
                path: path.to_path_buf(),
                message: format!("category '{}' declares no templates", category.value),
            });
        }

        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_loader_missing_dir_uses_builtin() {
        let temp = tempdir().unwrap();
        let loader = RegistryLoader::new(temp.path().join("nope"));
        let registry = loader.load().unwrap();
        assert_eq!(registry, TemplateRegistry::builtin());
    }

    #[test]
    fn test_loader_reads_registry_file() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join(REGISTRY_FILE),
            r#"
categories:
  - value: rs
    name: Rust
    path: rust
    flag: --rs
    templates: [axum, cli]
display_names:
  axum: Axum API
addons:
  - value: docker
    label: Docker
"#,
        )
        .unwrap();

        let registry = RegistryLoader::new(temp.path()).load().unwrap();
        let rust = registry.category_by_flag("--rs").unwrap();
        assert_eq!(rust.path, "rust");
        assert!(rust.has_template("cli"));
        assert_eq!(registry.display_name("axum"), "Axum API");
        assert_eq!(registry.addons.len(), 1);
        assert!(registry.category("ts").is_none());
    }

    #[test]
    fn test_loader_rejects_empty_category() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("templates.yml"),
            "categories:\n  - { value: go, name: Go, path: go, flag: --go }\n",
        )
        .unwrap();

        let err = RegistryLoader::new(temp.path()).load().unwrap_err();
        assert!(matches!(err, TemplateError::InvalidRegistry { .. }));
        assert!(err.to_string().contains("'go'"));
    }

    #[test]
    fn test_loader_rejects_malformed_yaml() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(REGISTRY_FILE), "categories: [: broken").unwrap();

        let err = RegistryLoader::new(temp.path()).load().unwrap_err();
        assert!(matches!(err, TemplateError::InvalidRegistry { .. }));
    }
}
