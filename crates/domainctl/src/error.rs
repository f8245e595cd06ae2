//! Error taxonomy for registry operations.
//!
//! Every variant that concerns a file or directory carries its path so the
//! caller can report which domain, skill, or config was at fault.

use domain_core::descriptor::DescriptorError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Coarse classification of a [`RegistryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Io,
    Malformed,
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: DescriptorError,
    },
}

impl RegistryError {
    /// Classify an I/O failure: absence (including a file standing where a
    /// directory is expected) becomes `NotFound`, invalid UTF-8 becomes
    /// `Malformed`, everything else stays `Io`.
    pub(crate) fn from_io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => Self::NotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::InvalidData => Self::Malformed {
                path: path.to_path_buf(),
                source: DescriptorError::InvalidJson(source.to_string()),
            },
            _ => Self::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    pub(crate) fn malformed(path: &Path, source: DescriptorError) -> Self {
        Self::Malformed {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Io { .. } => ErrorKind::Io,
            Self::Malformed { .. } => ErrorKind::Malformed,
        }
    }

    /// Path of the file or directory that caused the error.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path } | Self::Io { path, .. } | Self::Malformed { path, .. } => path,
        }
    }
}
