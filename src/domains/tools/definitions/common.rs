//! Shared parameter types and helpers for the registry tools.

use schemars::JsonSchema;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domains::registries::RegistryService;
use crate::domains::tools::ToolError;
use crate::domains::tools::registry::{ParamMap, ToolReply};

/// Catalog handle shared by the server and every tool handler.
pub type SharedCatalog = Arc<RwLock<RegistryService>>;

/// Separator placed between the files of a docs or examples answer.
pub const SECTION_DELIMITER: &str = "\n\n---\n\n";

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for tools that take no input.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NoParams {}

/// Parameters for tools addressing one registry.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistryParams {
    /// Name of the registry (see list_registries).
    pub registry_name: String,
}

/// Parameters for tools addressing one component of a registry.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComponentParams {
    /// Name of the registry (see list_registries).
    pub registry_name: String,

    /// Name of the component (see list_components).
    pub component_name: String,
}

/// Handler-side view of [`ComponentParams`] after parameter mapping.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ComponentRef {
    pub registry: String,
    pub component: String,
}

/// Maps `registryName` to the handler's `registry` parameter.
pub fn registry_param_map() -> ParamMap {
    ParamMap::new().with("registryName", "registry")
}

/// Maps `registryName`/`componentName` onto [`ComponentRef`].
pub fn component_param_map() -> ParamMap {
    registry_param_map().with("componentName", "component")
}

// ============================================================================
// Messages
// ============================================================================

pub fn registry_not_found(registry: &str) -> String {
    format!("Registry '{}' not found.", registry)
}

pub fn component_not_found(registry: &str, component: &str) -> String {
    format!(
        "Component '{}' not found in registry '{}'.",
        component, registry
    )
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Read each file through the catalog and join them into one answer.
///
/// Every section starts with the file's path so the answer stays traceable.
pub fn render_files(catalog: &RegistryService, paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| format!("File: {}\n\n{}", path.display(), catalog.read_file(path)))
        .collect::<Vec<_>>()
        .join(SECTION_DELIMITER)
}

/// Run a catalog query that reads files on the blocking pool.
///
/// The read guard travels with the query, so the catalog cannot change
/// while the files are read.
pub async fn query_blocking<F>(catalog: SharedCatalog, query: F) -> Result<ToolReply, ToolError>
where
    F: FnOnce(&RegistryService) -> ToolReply + Send + 'static,
{
    let catalog = catalog.read_owned().await;
    tokio::task::spawn_blocking(move || query(&catalog))
        .await
        .map_err(|e| ToolError::execution_failed(format!("Task failed: {}", e)))
}
