//! Template registry definitions.
//!
//! The registry is the static catalogue the resolver works over: which
//! categories (languages/variants) exist, which templates each one offers,
//! how they are labelled, and which add-ons can be layered on top.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A template category such as JavaScript or TypeScript.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Selection key (e.g., "ts")
    pub value: String,
    /// Human-readable label shown in prompts
    pub name: String,
    /// Directory prefix of the category's templates
    pub path: String,
    /// Command-line flag selecting this category (e.g., "--ts")
    pub flag: String,
    /// Template names available in this category
    #[serde(default)]
    pub templates: Vec<String>,
}

impl Category {
    /// Create a new category; `flag` defaults to `--<value>`.
    pub fn new(value: impl Into<String>, name: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            flag: format!("--{}", value),
            path: value.clone(),
            value,
            name: name.into(),
            templates: Vec::new(),
        }
    }

    /// Add a template to this category.
    pub fn template(mut self, name: impl Into<String>) -> Self {
        self.templates.push(name.into());
        self
    }

    /// Whether `name` is one of the templates declared for this category.
    pub fn has_template(&self, name: &str) -> bool {
        self.templates.iter().any(|t| t == name)
    }
}

/// An optional overlay that can be applied on top of a base template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddOn {
    /// Directory name under `addons/`
    pub value: String,
    /// Human-readable label shown in prompts
    pub label: String,
}

impl AddOn {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Registry of categories, templates and add-ons.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateRegistry {
    pub categories: Vec<Category>,
    /// Template name -> display label
    #[serde(default)]
    pub display_names: BTreeMap<String, String>,
    #[serde(default)]
    pub addons: Vec<AddOn>,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateRegistry {
    /// Create an empty registry.
    pub fn empty() -> Self {
        Self {
            categories: Vec::new(),
            display_names: BTreeMap::new(),
            addons: Vec::new(),
        }
    }

    /// The catalogue published in the upstream template repository.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();

        registry.register(Category::new("js", "JavaScript").template("vanilla"));
        registry.register(
            Category::new("ts", "TypeScript")
                .template("vanilla")
                .template("tw")
                .template("tw-shadcn")
                .template("tsrf"),
        );

        for (name, label) in [
            ("vanilla", "Vanilla"),
            ("tw", "Tailwind CSS"),
            ("tw-shadcn", "Tailwind CSS + Shadcn UI"),
            ("tsrf", "TanStack Router + Form"),
        ] {
            registry.display_names.insert(name.to_string(), label.to_string());
        }

        registry.addons.push(AddOn::new("tailwind", "Tailwind CSS"));
        registry.addons.push(AddOn::new("shadcn", "Shadcn UI"));

        registry
    }

    /// Register a category, replacing any existing one with the same value.
    pub fn register(&mut self, category: Category) {
        match self.categories.iter_mut().find(|c| c.value == category.value) {
            Some(existing) => *existing = category,
            None => self.categories.push(category),
        }
    }

    /// Get a category by its selection key.
    pub fn category(&self, value: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.value == value)
    }

    /// Get a category by its command-line flag (e.g., "--ts").
    pub fn category_by_flag(&self, flag: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.flag == flag)
    }

    /// Display label for a template, falling back to its name.
    pub fn display_name<'a>(&'a self, template: &'a str) -> &'a str {
        self.display_names
            .get(template)
            .map(String::as_str)
            .unwrap_or(template)
    }

    /// Get an add-on by its key.
    pub fn addon(&self, value: &str) -> Option<&AddOn> {
        self.addons.iter().find(|a| a.value == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_categories() {
        let registry = TemplateRegistry::builtin();

        let js = registry.category("js").unwrap();
        assert_eq!(js.flag, "--js");
        assert_eq!(js.templates, vec!["vanilla"]);

        let ts = registry.category_by_flag("--ts").unwrap();
        assert_eq!(ts.value, "ts");
        assert!(ts.has_template("tw-shadcn"));
        assert!(!ts.has_template("svelte"));
    }

    #[test]
    fn test_display_name_fallback() {
        let registry = TemplateRegistry::builtin();
        assert_eq!(registry.display_name("tsrf"), "TanStack Router + Form");
        assert_eq!(registry.display_name("custom"), "custom");
    }

    #[test]
    fn test_register_replaces_existing_category() {
        let mut registry = TemplateRegistry::builtin();
        registry.register(Category::new("js", "JavaScript").template("minimal"));

        assert_eq!(registry.categories.len(), 2);
        assert!(registry.category("js").unwrap().has_template("minimal"));
        assert!(!registry.category("js").unwrap().has_template("vanilla"));
    }

    #[test]
    fn test_builtin_addons() {
        let registry = TemplateRegistry::builtin();
        assert_eq!(registry.addon("shadcn").unwrap().label, "Shadcn UI");
        assert!(registry.addon("redux").is_none());
    }
}
