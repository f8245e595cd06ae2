//! Two-level discovery of the domain tree.
//!
//! The domains root holds one directory per domain (`domain.json`), and each
//! domain directory holds one directory per skill (`skill.json`).

mod domains;
mod skills;

pub use domains::{scan_domains, DiscoveryResult, DomainFailure, MAX_CONCURRENT_SCANS};
pub use skills::scan_skills;

use domain_core::{Config, ScanPolicy};

/// Options shared by the domain and skill scanners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    pub policy: ScanPolicy,
    pub skip_hidden: bool,
}

impl From<&Config> for ScanOptions {
    fn from(config: &Config) -> Self {
        Self {
            policy: config.scan_policy,
            skip_hidden: config.skip_hidden,
        }
    }
}
