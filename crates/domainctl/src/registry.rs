//! Registry facade: the operations external callers use.

use crate::entities::resolve_entities;
use crate::error::RegistryError;
use crate::reader::read_descriptor;
use crate::scan::{scan_domains, DiscoveryResult, ScanOptions};
use domain_core::descriptor::{DOMAIN_DESCRIPTOR, SKILL_DESCRIPTOR};
use domain_core::{Config, LangCode};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Entry point for domain discovery and descriptor lookups.
///
/// Holds only configuration; every call reads the filesystem again.
#[derive(Debug, Clone)]
pub struct DomainRegistry {
    domains_dir: PathBuf,
    shared_data_dir: PathBuf,
    options: ScanOptions,
}

impl DomainRegistry {
    pub fn new(config: &Config) -> Self {
        Self {
            domains_dir: config.domains_dir.clone(),
            shared_data_dir: config.shared_data_dir.clone(),
            options: ScanOptions::from(config),
        }
    }

    pub fn domains_dir(&self) -> &Path {
        &self.domains_dir
    }

    pub fn shared_data_dir(&self) -> &Path {
        &self.shared_data_dir
    }

    pub fn options(&self) -> ScanOptions {
        self.options
    }

    /// Discover all domains and their skills.
    pub async fn list_domains(&self) -> Result<DiscoveryResult, RegistryError> {
        scan_domains(&self.domains_dir, self.options).await
    }

    /// Read `domain.json` of the domain stored in directory `domain`.
    pub async fn domain_info(&self, domain: &str) -> Result<Value, RegistryError> {
        read_descriptor(&self.domains_dir.join(domain).join(DOMAIN_DESCRIPTOR)).await
    }

    /// Read `skill.json` of the skill stored in `<domain>/<skill>`.
    ///
    /// Both arguments are directory names. When a skill's declared name
    /// differs from its directory, use [`Self::skill_info_by_name`].
    pub async fn skill_info(&self, domain: &str, skill: &str) -> Result<Value, RegistryError> {
        read_descriptor(
            &self
                .domains_dir
                .join(domain)
                .join(skill)
                .join(SKILL_DESCRIPTOR),
        )
        .await
    }

    /// Read `skill.json` of a skill addressed by declared domain and skill
    /// names, resolved through a fresh registry build.
    pub async fn skill_info_by_name(
        &self,
        domain: &str,
        skill: &str,
    ) -> Result<Value, RegistryError> {
        let result = self.list_domains().await?;
        let Some(entry) = result.registry.skill(domain, skill) else {
            return Err(RegistryError::NotFound {
                path: self.domains_dir.join(domain).join(skill),
            });
        };
        debug!(
            domain,
            skill,
            path = %entry.path.display(),
            "resolved skill through registry"
        );
        read_descriptor(&entry.path.join(SKILL_DESCRIPTOR)).await
    }

    /// Read a skill config file and expand its shared entities for `lang`.
    pub async fn skill_config(
        &self,
        config_file: &Path,
        lang: &LangCode,
    ) -> Result<Value, RegistryError> {
        let config = read_descriptor(config_file).await?;
        resolve_entities(config, config_file, &self.shared_data_dir.join(lang)).await
    }
}
