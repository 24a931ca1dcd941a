//! Registry configuration and catalog data types.
//!
//! `RegistryConfig` and `ComponentLayout` are read from the registries file at
//! startup and never mutated. `Registry` and `Component` are derived from them
//! by the discovery resolver.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Configuration
// ============================================================================

/// Declarative description of one component library.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegistryConfig {
    /// Registry name, used as its identity in the catalog.
    pub name: String,

    /// Install instructions (usually a package manager command).
    #[serde(default)]
    pub install_command: String,

    /// Free-text description.
    #[serde(default)]
    pub description: String,

    /// Use-case tags.
    #[serde(default)]
    pub use_cases: Vec<String>,

    /// Where to look for components, docs and examples.
    pub layout: ComponentLayout,
}

/// On-disk layout of a registry's components and examples.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentLayout {
    /// Directory every other path in the layout is relative to.
    pub base_path: PathBuf,

    /// Component folders and their documentation files.
    pub components: ScanRoot,

    /// Example files, matched to components by name.
    #[serde(default)]
    pub examples: ScanRoot,

    /// How example file names are matched against `examples.extensions`.
    #[serde(default)]
    pub example_match: ExampleMatch,
}

/// A root directory with the sub-directories to scan beneath it.
///
/// Only the listed sub-directories are visited, and only one level below
/// each of them. An empty `sub_dirs` list yields nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScanRoot {
    /// Path relative to the layout's base path.
    #[serde(default)]
    pub root: PathBuf,

    /// Sub-directories of `root`, scanned in this order.
    #[serde(default)]
    pub sub_dirs: Vec<String>,

    /// Accepted file extensions (".md" and "md" are equivalent).
    #[serde(default)]
    pub extensions: Vec<String>,
}

/// Matching rule for example file names.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExampleMatch {
    /// The file name must end with one of the extensions.
    #[default]
    Suffix,

    /// Dedicated folders match on substring, flat folders on the last
    /// dot-segment of the file name.
    Contains,
}

impl ScanRoot {
    /// Extensions normalised to their dotted form, empty entries dropped.
    pub fn normalized_extensions(&self) -> Vec<String> {
        self.extensions
            .iter()
            .map(|ext| ext.trim())
            .filter(|ext| !ext.is_empty() && *ext != ".")
            .map(|ext| {
                if ext.starts_with('.') {
                    ext.to_string()
                } else {
                    format!(".{}", ext)
                }
            })
            .collect()
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// A registry with its discovered components.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Registry {
    pub name: String,
    pub install_command: String,
    pub description: String,
    pub use_cases: Vec<String>,
    pub components: Vec<Component>,
}

impl Registry {
    /// Build a registry from its configuration and resolved components.
    pub fn from_config(config: &RegistryConfig, components: Vec<Component>) -> Self {
        Self {
            name: config.name.clone(),
            install_command: config.install_command.clone(),
            description: config.description.clone(),
            use_cases: config.use_cases.clone(),
            components,
        }
    }

    /// Names of the registry's components, in catalog order.
    pub fn component_names(&self) -> Vec<&str> {
        self.components.iter().map(|c| c.name.as_str()).collect()
    }
}

/// A component discovered inside a registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Name of the directory the component was found under.
    pub name: String,

    /// Documentation files. Discovery never produces an empty list.
    pub docs: Vec<PathBuf>,

    /// Example files, `None` when none were resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<PathBuf>>,
}

impl Component {
    /// Create a component, collapsing an empty example list to `None`.
    pub fn new(name: impl Into<String>, docs: Vec<PathBuf>, examples: Vec<PathBuf>) -> Self {
        Self {
            name: name.into(),
            docs,
            examples: if examples.is_empty() {
                None
            } else {
                Some(examples)
            },
        }
    }

    /// Example paths, empty when there are none.
    pub fn example_paths(&self) -> &[PathBuf] {
        self.examples.as_deref().unwrap_or(&[])
    }
}
