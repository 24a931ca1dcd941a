//! Get component docs tool definition.
//!
//! A tool that returns the current contents of every documentation file of
//! a component, read fresh from disk on each call.

use tracing::{info, instrument};

use super::common::{
    ComponentParams, ComponentRef, SharedCatalog, component_not_found, component_param_map,
    query_blocking, registry_not_found, render_files,
};
use crate::domains::registries::RegistryService;
use crate::domains::tools::dispatcher::decode_argument;
use crate::domains::tools::registry::{ToolDescriptor, ToolReply};

/// Get component docs tool - documentation of one component.
pub struct GetComponentDocsTool;

impl GetComponentDocsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_component_docs";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get the documentation of a component. The contents of each documentation file are returned, separated by '---'.";

    /// Execute the tool logic.
    #[instrument(skip(catalog), fields(registry = %target.registry, component = %target.component))]
    pub fn execute(target: &ComponentRef, catalog: &RegistryService) -> ToolReply {
        if catalog.registry(&target.registry).is_none() {
            return ToolReply::text(registry_not_found(&target.registry));
        }

        let Some(component) = catalog.component(&target.registry, &target.component) else {
            return ToolReply::text(component_not_found(&target.registry, &target.component));
        };

        if component.docs.is_empty() {
            return ToolReply::text(format!(
                "No documentation available for component '{}'.",
                component.name
            ));
        }

        info!("Reading {} documentation files", component.docs.len());
        ToolReply::text(render_files(catalog, &component.docs))
    }

    /// Create the descriptor registered with the tool registry.
    pub fn descriptor(catalog: SharedCatalog) -> ToolDescriptor {
        ToolDescriptor::new::<ComponentParams, _, _>(Self::NAME, move |argument| {
            let catalog = catalog.clone();
            async move {
                let target: ComponentRef = decode_argument(argument)?;
                query_blocking(catalog, move |catalog| Self::execute(&target, catalog)).await
            }
        })
        .with_title("Get component documentation")
        .with_description(Self::DESCRIPTION)
        .with_param_map(component_param_map())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::registries::{Component, Registry};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn target(registry: &str, component: &str) -> ComponentRef {
        ComponentRef {
            registry: registry.to_string(),
            component: component.to_string(),
        }
    }

    fn text(reply: ToolReply) -> String {
        match reply {
            ToolReply::Data(serde_json::Value::String(text)) => text,
            other => panic!("Expected text reply, got {:?}", other),
        }
    }

    fn catalog(temp_dir: &TempDir) -> RegistryService {
        let readme = temp_dir.path().join("readme.md");
        let usage = temp_dir.path().join("usage.md");
        fs::write(&readme, "# Button").unwrap();
        fs::write(&usage, "Use it.").unwrap();

        let mut catalog = RegistryService::new(&[]);
        catalog.add(Registry {
            name: "Demo".to_string(),
            install_command: String::new(),
            description: String::new(),
            use_cases: vec![],
            components: vec![
                Component::new("Button", vec![readme, usage], vec![]),
                Component::new("Ghost", vec![], vec![PathBuf::from("ghost.js")]),
            ],
        });
        catalog
    }

    #[test]
    fn test_docs_are_concatenated() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = catalog(&temp_dir);

        let docs = text(GetComponentDocsTool::execute(&target("Demo", "Button"), &catalog));
        let sections: Vec<_> = docs.split("\n\n---\n\n").collect();
        assert_eq!(sections.len(), 2);
        assert!(sections[0].ends_with("# Button"));
        assert!(sections[1].ends_with("Use it."));
    }

    #[test]
    fn test_docs_are_read_fresh() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = catalog(&temp_dir);

        fs::write(temp_dir.path().join("readme.md"), "# Button v2").unwrap();
        let docs = text(GetComponentDocsTool::execute(&target("Demo", "Button"), &catalog));
        assert!(docs.contains("# Button v2"));
    }

    #[test]
    fn test_docs_misses() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = catalog(&temp_dir);

        assert_eq!(
            text(GetComponentDocsTool::execute(&target("Nope", "Button"), &catalog)),
            "Registry 'Nope' not found."
        );
        assert_eq!(
            text(GetComponentDocsTool::execute(&target("Demo", "Nope"), &catalog)),
            "Component 'Nope' not found in registry 'Demo'."
        );
        assert_eq!(
            text(GetComponentDocsTool::execute(&target("Demo", "Ghost"), &catalog)),
            "No documentation available for component 'Ghost'."
        );
    }
}
