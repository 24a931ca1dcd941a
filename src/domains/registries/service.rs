//! Registry catalog service.
//!
//! The RegistryService owns the in-memory catalog built from the registry
//! configuration at construction time. Lookups are lenient: a miss is a
//! `None` or an empty value plus a log line, never an error.

use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::discovery::DiscoveryResolver;
use super::fs::{FileSystem, LocalFileSystem};
use super::model::{Component, Registry, RegistryConfig};

/// In-memory catalog of registries and their components.
pub struct RegistryService {
    /// Registries in configuration order.
    registries: Vec<Registry>,

    /// Filesystem used for discovery and content reads.
    fs: Arc<dyn FileSystem>,
}

impl RegistryService {
    /// Build the catalog from configuration using the local filesystem.
    pub fn new(configs: &[RegistryConfig]) -> Self {
        Self::with_fs(configs, Arc::new(LocalFileSystem))
    }

    /// Build the catalog from configuration using the given filesystem.
    pub fn with_fs(configs: &[RegistryConfig], fs: Arc<dyn FileSystem>) -> Self {
        info!("Initializing RegistryService");

        if configs.is_empty() {
            warn!("No registries configured, the catalog is empty");
        }

        let resolver = DiscoveryResolver::new(fs.as_ref());
        let registries = configs
            .iter()
            .map(|config| resolver.resolve(config))
            .collect();

        Self { registries, fs }
    }

    /// All registries in catalog order.
    pub fn registries(&self) -> &[Registry] {
        &self.registries
    }

    /// First registry with exactly this name.
    pub fn registry(&self, name: &str) -> Option<&Registry> {
        let found = self.registries.iter().find(|r| r.name == name);
        if found.is_none() {
            warn!("Registry not found: {}", name);
        }
        found
    }

    /// Append a registry to the catalog.
    pub fn add(&mut self, registry: Registry) {
        info!("Adding registry: {}", registry.name);
        self.registries.push(registry);
    }

    /// Replace the registry with this name. Returns false if there is none.
    pub fn update(&mut self, name: &str, registry: Registry) -> bool {
        match self.registries.iter_mut().find(|r| r.name == name) {
            Some(slot) => {
                info!("Updating registry: {}", name);
                *slot = registry;
                true
            }
            None => {
                warn!("Cannot update unknown registry: {}", name);
                false
            }
        }
    }

    /// Remove the registry with this name. Returns false if there is none.
    pub fn delete(&mut self, name: &str) -> bool {
        match self.registries.iter().position(|r| r.name == name) {
            Some(index) => {
                info!("Deleting registry: {}", name);
                self.registries.remove(index);
                true
            }
            None => {
                warn!("Cannot delete unknown registry: {}", name);
                false
            }
        }
    }

    /// Components of a registry, empty if the registry is unknown.
    pub fn components(&self, registry: &str) -> &[Component] {
        self.registry(registry)
            .map(|r| r.components.as_slice())
            .unwrap_or(&[])
    }

    /// A single component of a registry.
    pub fn component(&self, registry: &str, component: &str) -> Option<&Component> {
        let Some(found) = self.registries.iter().find(|r| r.name == registry) else {
            warn!("Registry not found: {}", registry);
            return None;
        };

        let result = found.components.iter().find(|c| c.name == component);
        if result.is_none() {
            warn!(
                "Component '{}' not found in registry '{}'",
                component, registry
            );
        }
        result
    }

    /// Current contents of a file, or an empty string if it cannot be read.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn read_file(&self, path: &Path) -> String {
        match self.fs.read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read file content: {}", e);
                String::new()
            }
        }
    }
}
