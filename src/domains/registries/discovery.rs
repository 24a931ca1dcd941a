//! Convention-based component discovery.
//!
//! Turns a [`ComponentLayout`] plus the current contents of the disk into an
//! ordered list of [`Component`]s:
//!
//! 1. Every declared component sub-directory (`base/components.root/sub`) is
//!    listed; each immediate child directory is a candidate component.
//! 2. A candidate's immediate files whose extension is one of the
//!    documentation extensions become its docs. A candidate without docs is
//!    dropped.
//! 3. Examples are resolved per declared examples sub-directory, trying a
//!    dedicated `<sub>/<Component>/` folder first and falling back to files
//!    in `<sub>/` whose name contains the component name.
//!
//! Every filesystem failure is logged and treated as "nothing found" for
//! that step. Output order follows directory enumeration order; nothing is
//! sorted.

use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use super::error::RegistryError;
use super::fs::{DirEntry, FileSystem};
use super::model::{Component, ComponentLayout, ExampleMatch, Registry, RegistryConfig};

/// Resolves registry layouts against a filesystem.
pub struct DiscoveryResolver<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> DiscoveryResolver<'a> {
    /// Create a resolver reading through the given filesystem.
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Build a full registry from its configuration.
    #[instrument(skip_all, fields(registry = %config.name))]
    pub fn resolve(&self, config: &RegistryConfig) -> Registry {
        let components = self.discover_components(&config.layout);
        info!(
            "Discovered {} components in registry '{}'",
            components.len(),
            config.name
        );
        Registry::from_config(config, components)
    }

    /// Discover every component described by a layout.
    pub fn discover_components(&self, layout: &ComponentLayout) -> Vec<Component> {
        let doc_extensions = layout.components.normalized_extensions();
        let example_extensions = layout.examples.normalized_extensions();
        let components_root = layout.base_path.join(&layout.components.root);

        let mut components = Vec::new();

        for sub_dir in &layout.components.sub_dirs {
            let dir = components_root.join(sub_dir);

            let candidates = match self.child_dirs(&dir) {
                Ok(candidates) => candidates,
                Err(e) => {
                    warn!("Skipping component directory: {}", e);
                    continue;
                }
            };

            for candidate in candidates {
                let docs = self.collect_docs(&candidate.path, &doc_extensions);
                if docs.is_empty() {
                    debug!(
                        "No documentation found for '{}', skipping",
                        candidate.path.display()
                    );
                    continue;
                }

                let examples = self.collect_examples(layout, &candidate.name, &example_extensions);
                components.push(Component::new(candidate.name, docs, examples));
            }
        }

        components
    }

    /// Immediate child directories of `dir`.
    fn child_dirs(&self, dir: &Path) -> Result<Vec<DirEntry>, RegistryError> {
        if !self.fs.exists(dir) {
            return Err(RegistryError::not_found(dir));
        }
        if !self.fs.is_dir(dir)? {
            return Err(RegistryError::not_a_directory(dir));
        }

        Ok(self
            .fs
            .list_dir(dir)?
            .into_iter()
            .filter(DirEntry::is_dir)
            .collect())
    }

    /// Immediate files of `dir`, or nothing if it cannot be listed.
    fn files_in(&self, dir: &Path) -> Vec<DirEntry> {
        match self.fs.list_dir(dir) {
            Ok(entries) => entries.into_iter().filter(DirEntry::is_file).collect(),
            Err(e) => {
                warn!("Failed to list files: {}", e);
                Vec::new()
            }
        }
    }

    /// Documentation files directly inside a component folder.
    fn collect_docs(&self, component_dir: &Path, extensions: &[String]) -> Vec<PathBuf> {
        if extensions.is_empty() {
            return Vec::new();
        }

        self.files_in(component_dir)
            .into_iter()
            .filter(|entry| {
                last_extension(&entry.name)
                    .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext))
            })
            .map(|entry| entry.path)
            .collect()
    }

    /// Example files for one component, concatenated across sub-directories.
    fn collect_examples(
        &self,
        layout: &ComponentLayout,
        component: &str,
        extensions: &[String],
    ) -> Vec<PathBuf> {
        if extensions.is_empty() {
            return Vec::new();
        }

        let examples_root = layout.base_path.join(&layout.examples.root);
        let mut examples = Vec::new();

        for sub_dir in &layout.examples.sub_dirs {
            let dir = examples_root.join(sub_dir);
            let dedicated = dir.join(component);

            let has_dedicated = match self.fs.is_dir(&dedicated) {
                Ok(is_dir) => is_dir,
                Err(e) => {
                    warn!("Cannot inspect example folder: {}", e);
                    false
                }
            };

            if has_dedicated {
                examples.extend(self.dedicated_examples(
                    &dedicated,
                    extensions,
                    layout.example_match,
                ));
            } else {
                examples.extend(self.flat_examples(
                    &dir,
                    component,
                    extensions,
                    layout.example_match,
                ));
            }
        }

        examples
    }

    /// Files inside `<examples>/<sub>/<Component>/`.
    fn dedicated_examples(
        &self,
        dir: &Path,
        extensions: &[String],
        mode: ExampleMatch,
    ) -> Vec<PathBuf> {
        self.files_in(dir)
            .into_iter()
            .filter(|entry| {
                extensions.iter().any(|ext| match mode {
                    ExampleMatch::Suffix => entry.name.ends_with(ext.as_str()),
                    ExampleMatch::Contains => entry.name.contains(ext.as_str()),
                })
            })
            .map(|entry| entry.path)
            .collect()
    }

    /// Files in `<examples>/<sub>/` named after the component.
    fn flat_examples(
        &self,
        dir: &Path,
        component: &str,
        extensions: &[String],
        mode: ExampleMatch,
    ) -> Vec<PathBuf> {
        if !self.fs.exists(dir) {
            debug!("Examples directory does not exist: {}", dir.display());
            return Vec::new();
        }

        let needle = component.to_lowercase();

        self.files_in(dir)
            .into_iter()
            .filter(|entry| entry.name.to_lowercase().contains(&needle))
            .filter(|entry| match mode {
                ExampleMatch::Suffix => extensions
                    .iter()
                    .any(|ext| entry.name.ends_with(ext.as_str())),
                ExampleMatch::Contains => last_extension(&entry.name)
                    .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext)),
            })
            .map(|entry| entry.path)
            .collect()
    }
}

/// Last dot-segment of a file name, including the dot.
///
/// Dotfiles such as `.gitkeep` have no extension.
fn last_extension(name: &str) -> Option<&str> {
    match name.rfind('.') {
        Some(0) | None => None,
        Some(idx) => Some(&name[idx..]),
    }
}
