//! Filesystem access: descriptor reads and directory listings.

use crate::error::RegistryError;
use domain_core::descriptor::{self, DescriptorError};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read a JSON file and decode it into an untyped tree.
pub async fn read_descriptor(path: &Path) -> Result<Value, RegistryError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| RegistryError::from_io(path, e))?;
    descriptor::decode(&content).map_err(|e| RegistryError::malformed(path, e))
}

/// List the immediate subdirectories of `dir`, sorted by name.
///
/// Symlinks are followed. Entries that are not directories (including
/// dangling links) are skipped. With `skip_hidden`, names starting with `.`
/// are skipped too. A directory whose name is not valid UTF-8 cannot be
/// addressed by name and fails the listing as `Malformed`.
pub async fn list_subdirectories(
    dir: &Path,
    skip_hidden: bool,
) -> Result<Vec<(String, PathBuf)>, RegistryError> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| RegistryError::from_io(dir, e))?;

    let mut dirs = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| RegistryError::from_io(dir, e))?
    {
        let path = entry.path();
        let file_name = entry.file_name();
        if skip_hidden && file_name.as_encoded_bytes().starts_with(b".") {
            debug!(path = %path.display(), "skipping hidden entry");
            continue;
        }

        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                debug!(path = %path.display(), "not a directory, skipping");
                continue;
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "dangling entry, skipping");
                continue;
            }
            Err(e) => return Err(RegistryError::from_io(&path, e)),
        }

        let Some(name) = file_name.to_str().map(String::from) else {
            return Err(RegistryError::malformed(
                &path,
                DescriptorError::Invalid("directory name is not valid UTF-8".to_string()),
            ));
        };
        dirs.push((name, path));
    }

    dirs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(dirs)
}
