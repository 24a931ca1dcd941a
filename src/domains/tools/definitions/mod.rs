//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod common;
pub mod get_component_docs;
pub mod get_component_examples;
pub mod get_registry;
pub mod list_components;
pub mod list_registries;

pub use common::{ComponentParams, ComponentRef, NoParams, RegistryParams, SharedCatalog};
pub use get_component_docs::GetComponentDocsTool;
pub use get_component_examples::GetComponentExamplesTool;
pub use get_registry::GetRegistryTool;
pub use list_components::ListComponentsTool;
pub use list_registries::ListRegistriesTool;

use super::registry::{ToolDescriptor, ToolProvider};

/// The registry tools, bound to one catalog.
pub struct RegistryToolset {
    catalog: SharedCatalog,
}

impl RegistryToolset {
    /// Create the toolset over a shared catalog.
    pub fn new(catalog: SharedCatalog) -> Self {
        Self { catalog }
    }
}

impl ToolProvider for RegistryToolset {
    fn provider_name(&self) -> &str {
        "RegistryToolset"
    }

    fn tools(&self) -> Vec<ToolDescriptor> {
        vec![
            ListRegistriesTool::descriptor(self.catalog.clone()),
            GetRegistryTool::descriptor(self.catalog.clone()),
            ListComponentsTool::descriptor(self.catalog.clone()),
            GetComponentDocsTool::descriptor(self.catalog.clone()),
            GetComponentExamplesTool::descriptor(self.catalog.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::registries::RegistryService;
    use crate::domains::tools::registry::ToolRegistry;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    #[test]
    fn test_toolset_tool_names() {
        let catalog = Arc::new(RwLock::new(RegistryService::new(&[])));
        let registry = ToolRegistry::builder()
            .provider(&RegistryToolset::new(catalog))
            .unwrap()
            .build();

        assert_eq!(
            registry.tool_names(),
            vec![
                "list_registries",
                "get_registry",
                "list_components",
                "get_component_docs",
                "get_component_examples",
            ]
        );
    }
}
