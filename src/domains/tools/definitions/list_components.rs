//! List components tool definition.

use serde::Serialize;
use tracing::{info, instrument};

use super::common::{RegistryParams, SharedCatalog, registry_not_found, registry_param_map};
use crate::domains::registries::RegistryService;
use crate::domains::tools::dispatcher::decode_argument;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::registry::{ToolDescriptor, ToolReply};

/// One row of the component listing.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentSummary<'a> {
    pub name: &'a str,
    /// Number of documentation files.
    pub docs: usize,
    /// Number of example files.
    pub examples: usize,
}

/// List components tool - components of a registry with file counts.
pub struct ListComponentsTool;

impl ListComponentsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "list_components";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List the components of a registry with the number of documentation and example files available for each.";

    #[instrument(skip(catalog))]
    pub fn execute(registry: &str, catalog: &RegistryService) -> Result<ToolReply, ToolError> {
        let Some(found) = catalog.registry(registry) else {
            return Ok(ToolReply::text(registry_not_found(registry)));
        };

        if found.components.is_empty() {
            return Ok(ToolReply::text(format!(
                "No components found in registry '{}'.",
                registry
            )));
        }

        info!(
            "Listing {} components of registry {}",
            found.components.len(),
            registry
        );

        let rows: Vec<ComponentSummary<'_>> = found
            .components
            .iter()
            .map(|c| ComponentSummary {
                name: &c.name,
                docs: c.docs.len(),
                examples: c.example_paths().len(),
            })
            .collect();

        ToolReply::json(&rows)
    }

    /// Create the descriptor registered with the tool registry.
    pub fn descriptor(catalog: SharedCatalog) -> ToolDescriptor {
        ToolDescriptor::new::<RegistryParams, _, _>(Self::NAME, move |argument| {
            let catalog = catalog.clone();
            async move {
                let registry: String = decode_argument(argument)?;
                let catalog = catalog.read().await;
                Self::execute(&registry, &catalog)
            }
        })
        .with_title("List components")
        .with_description(Self::DESCRIPTION)
        .with_param_map(registry_param_map())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::registries::{Component, Registry};
    use std::path::PathBuf;

    fn registry(name: &str, components: Vec<Component>) -> Registry {
        Registry {
            name: name.to_string(),
            install_command: String::new(),
            description: String::new(),
            use_cases: vec![],
            components,
        }
    }

    #[test]
    fn test_list_components_counts_files() {
        let mut catalog = RegistryService::new(&[]);
        catalog.add(registry(
            "Demo",
            vec![
                Component::new(
                    "Button",
                    vec![PathBuf::from("a.md"), PathBuf::from("b.md")],
                    vec![PathBuf::from("Button.stories.js")],
                ),
                Component::new("Card", vec![PathBuf::from("card.md")], vec![]),
            ],
        ));

        match ListComponentsTool::execute("Demo", &catalog).unwrap() {
            ToolReply::Data(value) => assert_eq!(
                value,
                serde_json::json!([
                    { "name": "Button", "docs": 2, "examples": 1 },
                    { "name": "Card", "docs": 1, "examples": 0 }
                ])
            ),
            other => panic!("Expected data reply, got {:?}", other),
        }
    }

    #[test]
    fn test_list_components_empty_and_missing() {
        let mut catalog = RegistryService::new(&[]);
        catalog.add(registry("Empty", vec![]));

        match ListComponentsTool::execute("Empty", &catalog).unwrap() {
            ToolReply::Data(value) => {
                assert_eq!(value, "No components found in registry 'Empty'.")
            }
            other => panic!("Expected data reply, got {:?}", other),
        }

        match ListComponentsTool::execute("Missing", &catalog).unwrap() {
            ToolReply::Data(value) => assert_eq!(value, "Registry 'Missing' not found."),
            other => panic!("Expected data reply, got {:?}", other),
        }
    }
}
