//! Skill scanner: builds the skills map of one domain directory.

use super::ScanOptions;
use crate::error::RegistryError;
use crate::reader::{list_subdirectories, read_descriptor};
use domain_core::descriptor::{parse_skill_descriptor, SKILL_DESCRIPTOR};
use domain_core::Skill;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Scan one domain directory for skills, keyed by declared name.
///
/// Every subdirectory must hold a valid `skill.json`; the first one that does
/// not fails the whole scan, so a broken domain never yields a partial map.
/// Subdirectories are visited in name order and a later duplicate declared
/// name replaces an earlier one.
pub async fn scan_skills(
    domain_dir: &Path,
    options: ScanOptions,
) -> Result<BTreeMap<String, Skill>, RegistryError> {
    let mut skills = BTreeMap::new();

    for (alias, path) in list_subdirectories(domain_dir, options.skip_hidden).await? {
        let descriptor_path = path.join(SKILL_DESCRIPTOR);
        let value = read_descriptor(&descriptor_path).await?;
        let descriptor = parse_skill_descriptor(&value)
            .map_err(|e| RegistryError::malformed(&descriptor_path, e))?;

        let skill = Skill {
            name: descriptor.name.clone(),
            alias,
            path,
            bridge: descriptor.bridge,
        };
        if let Some(replaced) = skills.insert(descriptor.name, skill) {
            warn!(
                name = %replaced.name,
                replaced = %replaced.path.display(),
                "duplicate skill name, later directory wins"
            );
        }
    }

    debug!(path = %domain_dir.display(), count = skills.len(), "scanned skills");
    Ok(skills)
}
