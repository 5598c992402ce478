//! Error types for templates.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors that can occur during template operations.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Source directory does not exist: {}", .0.display())]
    SourceMissing(PathBuf),

    #[error("Directory {} already exists", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Invalid template registry in {}: {message}", path.display())]
    InvalidRegistry { path: PathBuf, message: String },

    #[error("Invalid manifest at {}: {message}", path.display())]
    InvalidManifest { path: PathBuf, message: String },

    #[error("Remote template fetch failed: {0}")]
    FetchFailed(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}
