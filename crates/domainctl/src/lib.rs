//! domainctl - skill domain discovery
//!
//! Library components: descriptor reads, shared entity expansion, the
//! two-level domain/skill scan, and the registry facade used by callers.

pub mod entities;
pub mod error;
pub mod reader;
pub mod registry;
pub mod scan;

pub use error::{ErrorKind, RegistryError};
pub use registry::DomainRegistry;
pub use scan::{DiscoveryResult, DomainFailure, ScanOptions};
