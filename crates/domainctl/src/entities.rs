//! Shared entity expansion for skill configs.
//!
//! A config may declare `"entities": { "<name>": <value> }`. String values name
//! a JSON file in the language's shared-data directory and are replaced by the
//! decoded contents of that file. Any other value is inline and kept as is.

use crate::error::RegistryError;
use crate::reader::read_descriptor;
use domain_core::descriptor::DescriptorError;
use futures::future::try_join_all;
use serde_json::Value;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Top-level config field holding entity definitions.
pub const ENTITIES_FIELD: &str = "entities";

/// Expand every file-backed entity of `config` from `shared_dir`.
///
/// `config_path` is the file `config` was read from; it tags errors about
/// the config itself. All reads run concurrently and are awaited before
/// returning, so the result never holds an unexpanded file name. The first
/// failing read is returned. Configs without an `entities` object are
/// returned unchanged.
pub async fn resolve_entities(
    mut config: Value,
    config_path: &Path,
    shared_dir: &Path,
) -> Result<Value, RegistryError> {
    let entities = config.get(ENTITIES_FIELD).and_then(Value::as_object);
    let pending: Vec<(String, PathBuf)> = match entities {
        Some(entities) => entities
            .iter()
            .filter_map(|(name, value)| value.as_str().map(|file| (name, file)))
            .map(|(name, file)| {
                shared_file_path(shared_dir, file)
                    .map(|path| (name.clone(), path))
                    .map_err(|e| RegistryError::malformed(config_path, e))
            })
            .collect::<Result<_, _>>()?,
        None => return Ok(config),
    };

    if pending.is_empty() {
        return Ok(config);
    }

    let loaded = try_join_all(pending.iter().map(|(_, path)| read_descriptor(path))).await?;

    if let Some(entities) = config
        .get_mut(ENTITIES_FIELD)
        .and_then(Value::as_object_mut)
    {
        for ((name, path), value) in pending.into_iter().zip(loaded) {
            debug!(entity = %name, path = %path.display(), "expanded shared entity");
            entities.insert(name, value);
        }
    }

    Ok(config)
}

/// Join an entity file name onto the shared-data directory.
///
/// A leading `/` is dropped; any other component that is not a plain name
/// (`..`, `.`, a drive prefix) is rejected so the result stays under
/// `shared_dir`.
fn shared_file_path(shared_dir: &Path, file: &str) -> Result<PathBuf, DescriptorError> {
    let relative = Path::new(file.trim_start_matches('/'));
    let plain = relative.components().next().is_some()
        && relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
    if !plain {
        return Err(DescriptorError::Invalid(format!(
            "entity file must be a plain relative path: {file}"
        )));
    }
    Ok(shared_dir.join(relative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn shared_dir() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("shared.json"), r#"{"x": 1}"#).unwrap();
        fs::write(
            tmp.path().join("colors.json"),
            r#"{"options": {"red": {"synonyms": ["red", "crimson"]}}}"#,
        )
        .unwrap();
        tmp
    }

    fn config_path(tmp: &TempDir) -> PathBuf {
        tmp.path().join("config/en.json")
    }

    #[tokio::test]
    async fn expands_string_entities_and_keeps_inline_ones() {
        let tmp = shared_dir();
        let config = json!({ "entities": { "a": "shared.json", "b": 42 } });

        let resolved = resolve_entities(config, &config_path(&tmp), tmp.path())
            .await
            .unwrap();
        assert_eq!(resolved, json!({ "entities": { "a": { "x": 1 }, "b": 42 } }));
    }

    #[tokio::test]
    async fn expands_every_string_entity() {
        let tmp = shared_dir();
        let config = json!({
            "actions": { "run": { "type": "logic" } },
            "entities": {
                "first": "shared.json",
                "second": "colors.json",
                "third": "shared.json",
                "inline": { "type": "enum" }
            }
        });

        let resolved = resolve_entities(config, &config_path(&tmp), tmp.path())
            .await
            .unwrap();
        let entities = resolved["entities"].as_object().unwrap();
        assert!(entities.values().all(|v| !v.is_string()));
        assert_eq!(entities["first"], json!({ "x": 1 }));
        assert_eq!(entities["second"]["options"]["red"]["synonyms"][1], "crimson");
        assert_eq!(entities["third"], entities["first"]);
        assert_eq!(entities["inline"], json!({ "type": "enum" }));
        assert_eq!(resolved["actions"], json!({ "run": { "type": "logic" } }));
    }

    #[tokio::test]
    async fn config_without_entities_is_unchanged() {
        let tmp = shared_dir();
        let config = json!({ "actions": { "run": {} }, "answers": ["hi"] });

        let resolved = resolve_entities(config.clone(), &config_path(&tmp), tmp.path())
            .await
            .unwrap();
        assert_eq!(resolved, config);
    }

    #[tokio::test]
    async fn non_object_entities_are_unchanged() {
        let tmp = shared_dir();
        let config = json!({ "entities": ["shared.json"] });

        let resolved = resolve_entities(config.clone(), &config_path(&tmp), tmp.path())
            .await
            .unwrap();
        assert_eq!(resolved, config);
    }

    #[tokio::test]
    async fn missing_shared_file_fails_with_its_path() {
        let tmp = shared_dir();
        let config = json!({ "entities": { "a": "shared.json", "b": "missing.json" } });

        let err = resolve_entities(config, &config_path(&tmp), tmp.path())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.path(), tmp.path().join("missing.json"));
    }

    #[tokio::test]
    async fn malformed_shared_file_fails() {
        let tmp = shared_dir();
        fs::write(tmp.path().join("broken.json"), "{").unwrap();
        let config = json!({ "entities": { "a": "broken.json" } });

        let err = resolve_entities(config, &config_path(&tmp), tmp.path())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[tokio::test]
    async fn parent_directory_entities_are_rejected() {
        let tmp = shared_dir();
        let shared = tmp.path().join("data/en");
        fs::create_dir_all(&shared).unwrap();
        fs::write(tmp.path().join("secret.json"), r#"{"leaked": true}"#).unwrap();
        let config = json!({ "entities": { "a": "../../secret.json" } });

        let err = resolve_entities(config, &config_path(&tmp), &shared)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
        assert_eq!(err.path(), config_path(&tmp));
    }

    #[test]
    fn shared_file_path_stays_under_shared_dir() {
        assert_eq!(
            shared_file_path(Path::new("/data/en"), "/colors.json").unwrap(),
            PathBuf::from("/data/en/colors.json")
        );
        assert_eq!(
            shared_file_path(Path::new("/data/en"), "nested/colors.json").unwrap(),
            PathBuf::from("/data/en/nested/colors.json")
        );
        for file in ["../secret.json", "nested/../../secret.json", "./colors.json", "", "/"] {
            assert!(
                shared_file_path(Path::new("/data/en"), file).is_err(),
                "{file} accepted"
            );
        }
    }
}
