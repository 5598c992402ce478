//! Base template sources.
//!
//! A base template is materialized either from a local template tree or from
//! a subfolder of a remote git repository. Remote templates are fetched with a
//! shallow `git clone` into a temporary directory and then copied, so the
//! target never contains repository metadata.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::copier::{copy_tree, copy_tree_filtered};
use crate::error::{TemplateError, TemplateResult};
use crate::resolver::TemplateId;

/// Repository hosting the published templates.
pub const DEFAULT_REPOSITORY: &str = "code-with-ohk/react-templates";

/// Where base templates come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// A local template tree, one directory per template id.
    Local { root: PathBuf },
    /// A git repository, given as `owner/name` (GitHub) or any clone URL.
    Remote { repository: String },
}

impl TemplateSource {
    pub fn local(root: impl Into<PathBuf>) -> Self {
        Self::Local { root: root.into() }
    }

    pub fn remote(repository: impl Into<String>) -> Self {
        Self::Remote {
            repository: repository.into(),
        }
    }

    /// Human-readable location of `template` within this source.
    pub fn describe(&self, template: &TemplateId) -> String {
        match self {
            Self::Local { root } => root.join(template.as_path()).display().to_string(),
            Self::Remote { repository } => {
                format!("{}/{}", repository.trim_end_matches('/'), template.as_path())
            }
        }
    }

    /// Copy `template` from this source into `target`.
    pub fn materialize(&self, template: &TemplateId, target: &Path) -> TemplateResult<Vec<PathBuf>> {
        match self {
            Self::Local { root } => {
                let template_path = root.join(template.as_path());
                if !template_path.is_dir() {
                    return Err(TemplateError::NotFound(format!(
                        "Local template not found at {}",
                        template_path.display()
                    )));
                }
                info!("Copying local template {:?}", template_path);
                copy_tree(&template_path, target)
            }
            Self::Remote { repository } => fetch_remote(repository, template.as_path(), target),
        }
    }
}

/// Clone URL for a repository reference.
///
/// `owner/name` shorthands resolve to GitHub; URLs, scp-style addresses and
/// existing local paths are used as given.
pub fn clone_url(repository: &str) -> String {
    let repository = repository.trim_end_matches('/');
    if repository.contains("://")
        || repository.starts_with("git@")
        || Path::new(repository).is_dir()
    {
        repository.to_string()
    } else {
        format!("https://github.com/{}.git", repository)
    }
}

fn fetch_remote(repository: &str, subpath: &str, target: &Path) -> TemplateResult<Vec<PathBuf>> {
    let url = clone_url(repository);
    let staging = tempfile::tempdir()?;
    let checkout = staging.path().join("checkout");

    info!("Fetching {} from {}", subpath, url);

    let output = Command::new("git")
        .args(["clone", "--depth", "1", "--quiet", &url])
        .arg(&checkout)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| TemplateError::FetchFailed(format!("failed to run git: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(TemplateError::FetchFailed(format!(
            "git clone {} failed: {}",
            url,
            stderr.trim()
        )));
    }

    let template_path = checkout.join(subpath);
    if !template_path.is_dir() {
        return Err(TemplateError::NotFound(format!(
            "{}/{}",
            repository.trim_end_matches('/'),
            subpath
        )));
    }

    debug!("Copying {:?} into {:?}", template_path, target);
    copy_tree_filtered(&template_path, target, |name| name == ".git")
}
