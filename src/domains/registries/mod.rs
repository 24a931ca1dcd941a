//! Registries domain module.
//!
//! This module discovers UI component libraries on disk and keeps them in an
//! in-memory catalog that the tools query.
//!
//! ## Architecture
//!
//! - `model.rs` - Registry configuration and catalog types
//! - `fs.rs` - Filesystem access seam
//! - `discovery.rs` - Convention-based component discovery
//! - `service.rs` - The registry catalog
//! - `error.rs` - Registry-specific error types

pub mod discovery;
mod error;
pub mod fs;
pub mod model;
mod service;

pub use discovery::DiscoveryResolver;
pub use error::RegistryError;
pub use fs::{DirEntry, EntryKind, FileSystem, LocalFileSystem};
pub use model::{Component, ComponentLayout, ExampleMatch, Registry, RegistryConfig, ScanRoot};
pub use service::RegistryService;
