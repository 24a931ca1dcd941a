//! Filesystem access used by discovery and the catalog.
//!
//! The `FileSystem` trait is the seam between the registries domain and the
//! disk. `LocalFileSystem` is the production implementation; tests substitute
//! in-memory doubles to inject failures.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::error::RegistryError;

/// Kind of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Other,
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// File name (last path component).
    pub name: String,

    /// Full path of the entry.
    pub path: PathBuf,

    pub kind: EntryKind,
}

impl DirEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// Filesystem primitives needed by the registries domain.
///
/// Every method may fail; callers are expected to log and degrade to an
/// empty result rather than propagate.
pub trait FileSystem: Send + Sync {
    /// Whether the path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Whether the path exists and is a directory.
    fn is_dir(&self, path: &Path) -> Result<bool, RegistryError>;

    /// Immediate entries of a directory, in enumeration order.
    fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>, RegistryError>;

    /// Read a file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> Result<String, RegistryError>;
}

/// `FileSystem` backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> Result<bool, RegistryError> {
        match fs::metadata(path) {
            Ok(metadata) => Ok(metadata.is_dir()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(RegistryError::io(path, e)),
        }
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>, RegistryError> {
        let entries = fs::read_dir(path).map_err(|e| RegistryError::io(path, e))?;

        let mut listing = Vec::new();
        for entry in readable_entries(path, entries) {
            let entry_path = entry.path();

            // Follow symlinks so a linked component folder counts as a folder.
            let kind = match fs::metadata(&entry_path) {
                Ok(m) if m.is_dir() => EntryKind::Dir,
                Ok(m) if m.is_file() => EntryKind::File,
                Ok(_) => EntryKind::Other,
                Err(_) => EntryKind::Other,
            };

            listing.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry_path,
                kind,
            });
        }

        Ok(listing)
    }

    fn read_to_string(&self, path: &Path) -> Result<String, RegistryError> {
        fs::read_to_string(path).map_err(|e| RegistryError::io(path, e))
    }
}

/// Entries that could be read. A failing entry is logged and skipped so its
/// siblings are still listed.
fn readable_entries<T>(
    dir: &Path,
    entries: impl IntoIterator<Item = std::io::Result<T>>,
) -> impl Iterator<Item = T> {
    let dir = dir.to_path_buf();
    entries.into_iter().filter_map(move |entry| match entry {
        Ok(entry) => Some(entry),
        Err(e) => {
            warn!("Skipping unreadable entry: {}", RegistryError::io(&dir, e));
            None
        }
    })
}
