//! Domain scanner: builds the full registry from the domains root.
//!
//! Domains are scanned concurrently, at most [`MAX_CONCURRENT_SCANS`] at a
//! time; each scan returns its own result and a single merge step runs after
//! all of them have finished. The merge walks
//! domains in directory-name order, so when two directories declare the same
//! name the one sorting last wins.

use super::skills::scan_skills;
use super::ScanOptions;
use crate::error::RegistryError;
use crate::reader::{list_subdirectories, read_descriptor};
use domain_core::descriptor::{parse_domain_descriptor, DOMAIN_DESCRIPTOR};
use domain_core::{Domain, Registry, ScanPolicy};
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Upper bound on domain scans in flight. Each scan holds a directory handle
/// open while it lists skills.
pub const MAX_CONCURRENT_SCANS: usize = 16;

/// Result of domain discovery.
#[derive(Debug, Default)]
pub struct DiscoveryResult {
    /// Successfully scanned domains.
    pub registry: Registry,
    /// Domains left out under [`ScanPolicy::BestEffort`]. Always empty under
    /// [`ScanPolicy::FailFast`].
    pub failures: Vec<DomainFailure>,
}

/// A domain that failed to scan.
#[derive(Debug)]
pub struct DomainFailure {
    /// Directory name of the domain.
    pub directory: String,
    /// Path of the domain directory.
    pub path: PathBuf,
    pub error: RegistryError,
}

/// Scan every domain under `domains_root`.
///
/// Under `FailFast` the first failing domain in directory-name order is
/// returned as the error; under `BestEffort` failing domains are omitted from
/// the registry and listed in [`DiscoveryResult::failures`]. Failing to list
/// the root itself is always an error.
pub async fn scan_domains(
    domains_root: &Path,
    options: ScanOptions,
) -> Result<DiscoveryResult, RegistryError> {
    let entries = list_subdirectories(domains_root, options.skip_hidden).await?;

    let outcomes: Vec<_> = stream::iter(entries)
        .map(|(directory, path)| async move {
            let outcome = scan_domain(&directory, &path, options).await;
            (directory, path, outcome)
        })
        .buffered(MAX_CONCURRENT_SCANS)
        .collect()
        .await;

    let mut result = DiscoveryResult::default();
    for (directory, path, outcome) in outcomes {
        match outcome {
            Ok(domain) => {
                if let Some(replaced) = result.registry.insert(domain) {
                    warn!(
                        name = %replaced.name,
                        replaced = %replaced.directory,
                        winner = %directory,
                        "duplicate domain name, later directory wins"
                    );
                }
            }
            Err(error) => match options.policy {
                ScanPolicy::FailFast => return Err(error),
                ScanPolicy::BestEffort => {
                    warn!(
                        path = %path.display(),
                        error = %error,
                        "failed to scan domain, skipping"
                    );
                    result.failures.push(DomainFailure {
                        directory,
                        path,
                        error,
                    });
                }
            },
        }
    }

    debug!(
        domains = result.registry.len(),
        skills = result.registry.skill_count(),
        failures = result.failures.len(),
        "discovered domains"
    );

    Ok(result)
}

/// Scan one domain directory: its descriptor, then its skills.
async fn scan_domain(
    directory: &str,
    path: &Path,
    options: ScanOptions,
) -> Result<Domain, RegistryError> {
    let descriptor_path = path.join(DOMAIN_DESCRIPTOR);
    let value = read_descriptor(&descriptor_path).await?;
    let descriptor = parse_domain_descriptor(&value)
        .map_err(|e| RegistryError::malformed(&descriptor_path, e))?;

    let skills = scan_skills(path, options).await?;

    Ok(Domain {
        name: descriptor.name,
        directory: directory.to_string(),
        path: path.to_path_buf(),
        skills,
    })
}
