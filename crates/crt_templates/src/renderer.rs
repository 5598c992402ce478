//! Placeholder file rendering.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::TemplateResult;

/// File-name suffix marking a placeholder file.
pub const PLACEHOLDER_SUFFIX: &str = ".ejs";

// Match <%= variable_name %> output tags
static PLACEHOLDER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<%=\s*([A-Za-z_][A-Za-z0-9_]*)\s*%>").expect("placeholder pattern is valid")
});

/// Values substituted into placeholder files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    values: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for a project: `projectName` and the comma-joined `addons`.
    pub fn for_project(project_name: &str, addons: &[String]) -> Self {
        let mut ctx = Self::new().with("projectName", project_name);
        ctx.set_addons(addons);
        ctx
    }

    /// Set `addons` to the selected add-ons, comma-joined.
    pub fn set_addons(&mut self, addons: &[String]) {
        self.insert("addons", addons.join(","));
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Renders `*.ejs` placeholder files in place.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderRenderer;

impl PlaceholderRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Replace every known placeholder in `content`; unknown ones are kept verbatim.
    pub fn render_content(&self, content: &str, context: &RenderContext) -> String {
        PLACEHOLDER_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                context
                    .get(&caps[1])
                    .map(String::from)
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    /// Whether `path` names a placeholder file.
    pub fn is_placeholder(path: &Path) -> bool {
        path.file_name()
            .map(|name| {
                let name = name.to_string_lossy();
                name.len() > PLACEHOLDER_SUFFIX.len() && name.ends_with(PLACEHOLDER_SUFFIX)
            })
            .unwrap_or(false)
    }

    /// Render every placeholder file under `root`.
    ///
    /// Each `foo.ext.ejs` is rendered to `foo.ext` (overwriting it) and the
    /// original is deleted. Returns the rendered output paths.
    pub fn render_tree(&self, root: &Path, context: &RenderContext) -> TemplateResult<Vec<PathBuf>> {
        let mut placeholders = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() && Self::is_placeholder(entry.path()) {
                placeholders.push(entry.into_path());
            }
        }

        let mut rendered_files = Vec::with_capacity(placeholders.len());
        for source in placeholders {
            let content = fs::read_to_string(&source)?;
            let rendered = self.render_content(&content, context);

            let target = strip_suffix(&source);
            fs::write(&target, rendered)?;
            fs::remove_file(&source)?;

            debug!("Rendered: {:?}", target);
            rendered_files.push(target);
        }

        if !rendered_files.is_empty() {
            info!("Rendered {} placeholder files", rendered_files.len());
        }
        Ok(rendered_files)
    }
}

fn strip_suffix(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stripped = name.strip_suffix(PLACEHOLDER_SUFFIX).unwrap_or(&name);
    path.with_file_name(stripped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_render_content() {
        let renderer = PlaceholderRenderer::new();
        let ctx = RenderContext::new()
            .with("projectName", "my-app")
            .with("version", "1.0.0");

        let content = "App: <%= projectName %>, Version: <%=version%>";
        assert_eq!(
            renderer.render_content(content, &ctx),
            "App: my-app, Version: 1.0.0"
        );
    }

    #[test]
    fn test_unknown_placeholders_are_kept() {
        let renderer = PlaceholderRenderer::new();
        let ctx = RenderContext::new();
        let content = "<title><%= title %></title> <% if (x) { %>";
        assert_eq!(renderer.render_content(content, &ctx), content);
    }

    #[test]
    fn test_project_context() {
        let ctx = RenderContext::for_project(
            "demo",
            &["tailwind".to_string(), "tw-shadcn".to_string()],
        );
        assert_eq!(ctx.get("projectName"), Some("demo"));
        assert_eq!(ctx.get("addons"), Some("tailwind,tw-shadcn"));
        assert_eq!(ctx.get("has_tailwind"), None);

        let content = "<%= projectName %>: <%= addons %>";
        assert_eq!(
            PlaceholderRenderer::new().render_content(content, &ctx),
            "demo: tailwind,tw-shadcn"
        );
    }

    #[test]
    fn test_is_placeholder() {
        assert!(PlaceholderRenderer::is_placeholder(Path::new("index.html.ejs")));
        assert!(PlaceholderRenderer::is_placeholder(Path::new("src/App.tsx.ejs")));
        assert!(!PlaceholderRenderer::is_placeholder(Path::new("index.html")));
        assert!(!PlaceholderRenderer::is_placeholder(Path::new(".ejs")));
    }

    #[test]
    fn test_render_tree_replaces_and_removes_originals() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("index.html.ejs"), "<title><%= projectName %></title>").unwrap();
        fs::write(root.join("src/main.ts.ejs"), "// <%= projectName %>").unwrap();
        fs::write(root.join("src/main.ts"), "stale").unwrap();
        fs::write(root.join("README.md"), "<%= projectName %>").unwrap();

        let ctx = RenderContext::for_project("demo", &[]);
        let rendered = PlaceholderRenderer::new().render_tree(root, &ctx).unwrap();

        assert_eq!(rendered.len(), 2);
        assert_eq!(
            fs::read_to_string(root.join("index.html")).unwrap(),
            "<title>demo</title>"
        );
        assert_eq!(fs::read_to_string(root.join("src/main.ts")).unwrap(), "// demo");
        assert!(!root.join("index.html.ejs").exists());
        assert!(!root.join("src/main.ts.ejs").exists());
        // Only suffixed files are placeholders
        assert_eq!(
            fs::read_to_string(root.join("README.md")).unwrap(),
            "<%= projectName %>"
        );
    }
}
