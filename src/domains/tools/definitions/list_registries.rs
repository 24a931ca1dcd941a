//! List registries tool definition.
//!
//! A tool that returns the names of every registry in the catalog.

use tracing::{info, instrument};

use super::common::{NoParams, SharedCatalog};
use crate::domains::registries::RegistryService;
use crate::domains::tools::registry::{ToolDescriptor, ToolReply};

/// List registries tool - names of all known registries.
pub struct ListRegistriesTool;

impl ListRegistriesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "list_registries";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "List the names of all available UI component registries (design systems).";

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub fn execute(catalog: &RegistryService) -> ToolReply {
        let names: Vec<&str> = catalog
            .registries()
            .iter()
            .map(|r| r.name.as_str())
            .collect();

        info!("Listing {} registries", names.len());
        ToolReply::Data(serde_json::json!(names))
    }

    /// Create the descriptor registered with the tool registry.
    pub fn descriptor(catalog: SharedCatalog) -> ToolDescriptor {
        ToolDescriptor::new::<NoParams, _, _>(Self::NAME, move |_| {
            let catalog = catalog.clone();
            async move {
                let catalog = catalog.read().await;
                Ok(Self::execute(&catalog))
            }
        })
        .with_title("List registries")
        .with_description(Self::DESCRIPTION)
    }
}
