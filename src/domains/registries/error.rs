//! Registry-specific error types.
//!
//! These never leave the registries domain: discovery and the catalog log
//! them and fall back to empty results.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by filesystem access during discovery and content reads.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// An I/O operation on a path failed.
    #[error("I/O error for path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The path exists but is not a directory.
    #[error("Not a directory: '{0}'")]
    NotADirectory(PathBuf),

    /// The path does not exist.
    #[error("Path does not exist: '{0}'")]
    NotFound(PathBuf),
}

impl RegistryError {
    /// Create an I/O error bound to a path.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a "not a directory" error.
    pub fn not_a_directory(path: impl AsRef<Path>) -> Self {
        Self::NotADirectory(path.as_ref().to_path_buf())
    }

    /// Create a "not found" error.
    pub fn not_found(path: impl AsRef<Path>) -> Self {
        Self::NotFound(path.as_ref().to_path_buf())
    }
}
