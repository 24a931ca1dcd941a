//! Get registry tool definition.
//!
//! A tool that describes one registry: description, install command, use
//! cases and component names.

use serde::Serialize;
use tracing::{info, instrument};

use super::common::{RegistryParams, SharedCatalog, registry_not_found, registry_param_map};
use crate::domains::registries::RegistryService;
use crate::domains::tools::dispatcher::decode_argument;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::registry::{ToolDescriptor, ToolReply};

// ============================================================================
// Structured Output Types
// ============================================================================

/// Registry summary returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrySummary<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub install_command: &'a str,
    pub use_cases: &'a [String],
    pub components: Vec<&'a str>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Get registry tool - metadata of one registry.
pub struct GetRegistryTool;

impl GetRegistryTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_registry";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get a registry's description, install command, use cases and the names of its components.";

    /// Execute the tool logic.
    #[instrument(skip(catalog))]
    pub fn execute(registry: &str, catalog: &RegistryService) -> Result<ToolReply, ToolError> {
        let Some(found) = catalog.registry(registry) else {
            return Ok(ToolReply::text(registry_not_found(registry)));
        };

        info!("Describing registry: {}", found.name);
        ToolReply::json(&RegistrySummary {
            name: &found.name,
            description: &found.description,
            install_command: &found.install_command,
            use_cases: &found.use_cases,
            components: found.component_names(),
        })
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
        .with_title("Get registry")
        .with_description(Self::DESCRIPTION)
        .with_param_map(registry_param_map())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::registries::{Component, Registry};
    use std::path::PathBuf;

    fn catalog() -> RegistryService {
        let mut catalog = RegistryService::new(&[]);
        catalog.add(Registry {
            name: "Demo".to_string(),
            install_command: "npm install demo-ui".to_string(),
            description: "Demo design system".to_string(),
            use_cases: vec!["forms".to_string()],
            components: vec![Component::new(
                "Button",
                vec![PathBuf::from("Button/readme.md")],
                vec![],
            )],
        });
        catalog
    }

    #[test]
    fn test_get_registry_execute() {
        let reply = GetRegistryTool::execute("Demo", &catalog()).unwrap();
        match reply {
            ToolReply::Data(value) => {
                assert_eq!(value["name"], "Demo");
                assert_eq!(value["installCommand"], "npm install demo-ui");
                assert_eq!(value["useCases"], serde_json::json!(["forms"]));
                assert_eq!(value["components"], serde_json::json!(["Button"]));
            }
            other => panic!("Expected data reply, got {:?}", other),
        }
    }

    #[test]
    fn test_get_registry_not_found() {
        let reply = GetRegistryTool::execute("Nope", &catalog()).unwrap();
        match reply {
            ToolReply::Data(value) => assert_eq!(value, "Registry 'Nope' not found."),
            other => panic!("Expected data reply, got {:?}", other),
        }
    }
}
