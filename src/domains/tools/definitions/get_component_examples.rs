//! Get component examples tool definition.

use tracing::{info, instrument};

use super::common::{
    ComponentParams, ComponentRef, SharedCatalog, component_not_found, component_param_map,
    query_blocking, registry_not_found, render_files,
};
use crate::domains::registries::RegistryService;
use crate::domains::tools::dispatcher::decode_argument;
use crate::domains::tools::registry::{ToolDescriptor, ToolReply};

/// Get component examples tool - code examples of one component.
pub struct GetComponentExamplesTool;

impl GetComponentExamplesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_component_examples";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get the code examples of a component (stories, demos). The contents of each example file are returned, separated by '---'.";

    #[instrument(skip(catalog), fields(registry = %target.registry, component = %target.component))]
    pub fn execute(target: &ComponentRef, catalog: &RegistryService) -> ToolReply {
        if catalog.registry(&target.registry).is_none() {
            return ToolReply::text(registry_not_found(&target.registry));
        }

        let Some(component) = catalog.component(&target.registry, &target.component) else {
            return ToolReply::text(component_not_found(&target.registry, &target.component));
        };

        let examples = component.example_paths();
        if examples.is_empty() {
            return ToolReply::text(format!(
                "No examples available for component '{}'.",
                component.name
            ));
        }

        info!("Reading {} example files", examples.len());
        ToolReply::text(render_files(catalog, examples))
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
        .with_title("Get component examples")
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

    fn text(reply: ToolReply) -> String {
        match reply {
            ToolReply::Data(serde_json::Value::String(text)) => text,
            other => panic!("Expected text reply, got {:?}", other),
        }
    }

    #[test]
    fn test_examples_execute() {
        let temp_dir = TempDir::new().unwrap();
        let story = temp_dir.path().join("Button.stories.js");
        fs::write(&story, "export const Primary = {};").unwrap();

        let mut catalog = RegistryService::new(&[]);
        catalog.add(Registry {
            name: "Demo".to_string(),
            install_command: String::new(),
            description: String::new(),
            use_cases: vec![],
            components: vec![
                Component::new("Button", vec![PathBuf::from("readme.md")], vec![story.clone()]),
                Component::new("Card", vec![PathBuf::from("card.md")], vec![]),
            ],
        });

        let button = ComponentRef {
            registry: "Demo".to_string(),
            component: "Button".to_string(),
        };
        let examples = text(GetComponentExamplesTool::execute(&button, &catalog));
        assert_eq!(
            examples,
            format!("File: {}\n\nexport const Primary = {{}};", story.display())
        );

        let card = ComponentRef {
            registry: "Demo".to_string(),
            component: "Card".to_string(),
        };
        assert_eq!(
            text(GetComponentExamplesTool::execute(&card, &catalog)),
            "No examples available for component 'Card'."
        );
    }
}
