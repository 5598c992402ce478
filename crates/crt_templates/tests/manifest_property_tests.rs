//! Property-based tests for manifest merging.

use proptest::prelude::*;
use serde_json::{Map, Value};

use crt_templates::{merge_manifests, to_manifest_string};

/// Dependency group: package name -> version string.
fn group_strategy() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map("[a-z]{1,6}", "[0-9]\\.[0-9]\\.[0-9]", 0..8).prop_map(|deps| {
        deps.into_iter()
            .map(|(name, version)| (name, Value::String(version)))
            .collect()
    })
}

fn manifest_strategy() -> impl Strategy<Value = Value> {
    (
        group_strategy(),
        group_strategy(),
        prop::option::of("[a-z-]{1,10}"),
        prop::collection::vec("[a-z]{1,5}", 0..3),
    )
        .prop_map(|(deps, dev_deps, name, files)| {
            let mut manifest = Map::new();
            if let Some(name) = name {
                manifest.insert("name".into(), Value::String(name));
            }
            manifest.insert("dependencies".into(), Value::Object(deps));
            manifest.insert("devDependencies".into(), Value::Object(dev_deps));
            manifest.insert(
                "files".into(),
                Value::Array(files.into_iter().map(Value::String).collect()),
            );
            Value::Object(manifest)
        })
}

proptest! {
    /// Every dependency of either side survives, with the overlay's version on collisions.
    #[test]
    fn prop_dependency_groups_union(base in manifest_strategy(), overlay in manifest_strategy()) {
        let merged = merge_manifests(&base, &overlay);

        for group in ["dependencies", "devDependencies"] {
            let merged_group = merged[group].as_object().unwrap();
            let base_group = base[group].as_object().unwrap();
            let overlay_group = overlay[group].as_object().unwrap();

            for (name, version) in overlay_group {
                prop_assert_eq!(merged_group.get(name), Some(version));
            }
            for (name, version) in base_group {
                if !overlay_group.contains_key(name) {
                    prop_assert_eq!(merged_group.get(name), Some(version));
                }
            }
            prop_assert!(merged_group
                .keys()
                .all(|k| base_group.contains_key(k) || overlay_group.contains_key(k)));
        }
    }

    /// Arrays are replaced wholesale.
    #[test]
    fn prop_arrays_are_atomic(base in manifest_strategy(), overlay in manifest_strategy()) {
        let merged = merge_manifests(&base, &overlay);
        prop_assert_eq!(&merged["files"], &overlay["files"]);
    }

    /// Merging is idempotent and its serialization byte-stable.
    #[test]
    fn prop_merge_is_idempotent(base in manifest_strategy(), overlay in manifest_strategy()) {
        let once = merge_manifests(&base, &overlay);
        let twice = merge_manifests(&once, &overlay);

        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(to_manifest_string(&once).unwrap(), to_manifest_string(&twice).unwrap());
    }

    /// An empty overlay leaves the base untouched.
    #[test]
    fn prop_empty_overlay_is_identity(base in manifest_strategy()) {
        let merged = merge_manifests(&base, &Value::Object(Map::new()));
        prop_assert_eq!(merged, base);
    }
}
