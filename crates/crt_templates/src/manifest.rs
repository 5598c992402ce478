//! Project manifest (`package.json`) merging.
//!
//! Merging is a structural deep merge over JSON values: nested objects are
//! merged key by key, everything else (scalars, arrays, `null`) from the
//! overlay replaces the base value. Dependency groups therefore accumulate,
//! and a dependency declared on both sides takes the overlay's version.
//!
//! Key order is preserved: keys already in the base keep their position and
//! new keys from the overlay are appended in the overlay's order.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use tracing::debug;

use crate::error::{TemplateError, TemplateResult};

/// Manifest file name at the root of every template, add-on and project.
pub const MANIFEST_FILE: &str = "package.json";

/// Deep-merge `overlay` on top of `base`, returning the merged document.
pub fn merge_manifests(base: &Value, overlay: &Value) -> Value {
    let mut merged = base.clone();
    merge_into(&mut merged, overlay);
    merged
}

fn merge_into(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(base_value) if base_value.is_object() && overlay_value.is_object() => {
                        merge_into(base_value, overlay_value);
                    }
                    _ => {
                        base_map.insert(key.clone(), overlay_value.clone());
                    }
                }
            }
        }
        (base, overlay) => *base = overlay.clone(),
    }
}

/// Serialize a manifest with tab indentation and a trailing newline.
pub fn to_manifest_string(manifest: &Value) -> TemplateResult<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"\t");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    manifest.serialize(&mut serializer)?;

    let mut out = String::from_utf8(buf)
        .map_err(|e| TemplateError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
    out.push('\n');
    Ok(out)
}

/// Read and parse a manifest file.
pub fn read_manifest(path: &Path) -> TemplateResult<Value> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| TemplateError::InvalidManifest {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Write a manifest file in the canonical format.
pub fn write_manifest(path: &Path, manifest: &Value) -> TemplateResult<()> {
    fs::write(path, to_manifest_string(manifest)?)?;
    Ok(())
}

/// Merge the manifest at `overlay_path` into the one at `target_path`.
///
/// Returns `Ok(false)` without touching anything when either file is absent.
pub fn merge_manifest_files(target_path: &Path, overlay_path: &Path) -> TemplateResult<bool> {
    if !target_path.is_file() || !overlay_path.is_file() {
        debug!(
            "Skipping manifest merge ({:?} into {:?}): file missing",
            overlay_path, target_path
        );
        return Ok(false);
    }

    let base = read_manifest(target_path)?;
    let overlay = read_manifest(overlay_path)?;
    write_manifest(target_path, &merge_manifests(&base, &overlay))?;

    debug!("Merged {:?} into {:?}", overlay_path, target_path);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_dependency_groups_union_with_overlay_winning() {
        let base = json!({"dependencies": {"a": "1.0.0"}});
        let overlay = json!({"dependencies": {"a": "2.0.0", "b": "1.0.0"}});

        let merged = merge_manifests(&base, &overlay);

        assert_eq!(merged, json!({"dependencies": {"a": "2.0.0", "b": "1.0.0"}}));
    }

    #[test]
    fn test_nested_groups_merge_independently() {
        let base = json!({
            "name": "base",
            "scripts": {"dev": "vite", "build": "vite build"},
            "dependencies": {"react": "^19.0.0"},
            "devDependencies": {"vite": "^6.0.0"}
        });
        let overlay = json!({
            "scripts": {"lint": "eslint ."},
            "devDependencies": {"tailwindcss": "^4.0.0", "vite": "^6.1.0"}
        });

        let merged = merge_manifests(&base, &overlay);

        assert_eq!(merged["name"], "base");
        assert_eq!(merged["scripts"]["dev"], "vite");
        assert_eq!(merged["scripts"]["lint"], "eslint .");
        assert_eq!(merged["dependencies"]["react"], "^19.0.0");
        assert_eq!(merged["devDependencies"]["vite"], "^6.1.0");
        assert_eq!(merged["devDependencies"]["tailwindcss"], "^4.0.0");
    }

    #[test]
    fn test_arrays_and_scalars_replace() {
        let base = json!({"files": ["dist", "src"], "private": true, "engines": {"node": ">=18"}});
        let overlay = json!({"files": ["build"], "private": false, "engines": "any"});

        let merged = merge_manifests(&base, &overlay);

        assert_eq!(merged["files"], json!(["build"]));
        assert_eq!(merged["private"], false);
        assert_eq!(merged["engines"], "any");
    }

    #[test]
    fn test_key_order_is_preserved() {
        let base = json!({"name": "app", "version": "0.0.0", "scripts": {"dev": "vite"}});
        let overlay = json!({"type": "module", "version": "1.0.0", "name": "renamed"});

        let merged = merge_manifests(&base, &overlay);
        let keys: Vec<&str> = merged.as_object().unwrap().keys().map(String::as_str).collect();

        assert_eq!(keys, vec!["name", "version", "scripts", "type"]);
    }

    #[test]
    fn test_manifest_string_uses_tabs() {
        let manifest = json!({"name": "app", "scripts": {"dev": "vite"}});
        let out = to_manifest_string(&manifest).unwrap();
        assert_eq!(
            out,
            "{\n\t\"name\": \"app\",\n\t\"scripts\": {\n\t\t\"dev\": \"vite\"\n\t}\n}\n"
        );
    }

    #[test]
    fn test_merge_files_skips_when_either_missing() {
        let temp = tempdir().unwrap();
        let target = temp.path().join("package.json");
        let overlay = temp.path().join("addon.json");
        fs::write(&overlay, r#"{"dependencies":{"b":"1.0.0"}}"#).unwrap();

        assert!(!merge_manifest_files(&target, &overlay).unwrap());
        assert!(!target.exists());

        fs::write(&target, "{ \"name\": \"untouched\" }").unwrap();
        assert!(!merge_manifest_files(&target, &temp.path().join("missing.json")).unwrap());
        assert_eq!(fs::read_to_string(&target).unwrap(), "{ \"name\": \"untouched\" }");
    }

    #[test]
    fn test_merge_files_is_byte_stable() {
        let temp = tempdir().unwrap();
        let target = temp.path().join("package.json");
        let overlay = temp.path().join("addon.json");
        fs::write(&target, r#"{"name":"app","dependencies":{"a":"1.0.0"}}"#).unwrap();
        fs::write(&overlay, r#"{"dependencies":{"a":"2.0.0","b":"1.0.0"}}"#).unwrap();

        assert!(merge_manifest_files(&target, &overlay).unwrap());
        let first = fs::read(&target).unwrap();
        assert!(merge_manifest_files(&target, &overlay).unwrap());
        let second = fs::read(&target).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_manifest_reports_path() {
        let temp = tempdir().unwrap();
        let target = temp.path().join("package.json");
        let overlay = temp.path().join("addon.json");
        fs::write(&target, "{}").unwrap();
        fs::write(&overlay, "{ not json").unwrap();

        let err = merge_manifest_files(&target, &overlay).unwrap_err();
        assert!(matches!(err, TemplateError::InvalidManifest { ref path, .. } if path == &overlay));
    }
}
