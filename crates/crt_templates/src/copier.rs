//! Recursive directory copying.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{TemplateError, TemplateResult};

/// Copy every file and directory under `source` into `dest`.
///
/// Existing files in `dest` are overwritten.
pub fn copy_tree(source: &Path, dest: &Path) -> TemplateResult<Vec<PathBuf>> {
    copy_tree_filtered(source, dest, |_| false)
}

/// Copy `source` into `dest`, skipping entries whose base name matches `exclude`.
///
/// An excluded directory is skipped together with everything below it.
/// Returns the destination paths of the files written. Files already written
/// are left in place if a later entry fails.
pub fn copy_tree_filtered<F>(source: &Path, dest: &Path, exclude: F) -> TemplateResult<Vec<PathBuf>>
where
    F: Fn(&str) -> bool,
{
    if !source.is_dir() {
        return Err(TemplateError::SourceMissing(source.to_path_buf()));
    }

    fs::create_dir_all(dest)?;

    let mut created_files = Vec::new();

    let walker = WalkDir::new(source)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !exclude(&entry.file_name().to_string_lossy()));

    for entry in walker {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|_| TemplateError::SourceMissing(entry.path().to_path_buf()))?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &target)?;
        debug!("Copied: {:?}", relative);
        created_files.push(target);
    }

    Ok(created_files)
}
