//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol on top of the registry catalog and the tool dispatcher.
//!
//! ## Startup
//!
//! 1. The registry catalog is built from configuration (discovery runs once)
//! 2. Every tool provider contributes its descriptors to the ToolRegistry;
//!    a duplicate tool name aborts startup
//! 3. The ToolRouter is built from the registry, one route per tool
//!
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use super::config::Config;
use super::error;
use crate::domains::registries::RegistryService;
use crate::domains::tools::{
    Dispatcher, RegistryToolset, ToolRegistry, build_tool_router, definitions::SharedCatalog,
};

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp. Cloning is
/// cheap; clones share the catalog and the tool registry.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// The registry catalog queried by the tools.
    catalog: SharedCatalog,

    /// Dispatcher over the registered tools.
    dispatcher: Dispatcher,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server, building the catalog from configuration.
    pub fn new(config: Config) -> error::Result<Self> {
        let catalog = RegistryService::new(&config.registries.registries);
        Self::with_catalog(config, Arc::new(RwLock::new(catalog)))
    }

    /// Create a new MCP server over an existing catalog.
    pub fn with_catalog(config: Config, catalog: SharedCatalog) -> error::Result<Self> {
        let registry = ToolRegistry::builder()
            .provider(&RegistryToolset::new(catalog.clone()))?
            .build();
        info!("Registered {} tools", registry.len());

        let dispatcher = Dispatcher::new(Arc::new(registry));

        Ok(Self {
            tool_router: build_tool_router::<Self>(dispatcher.clone()),
            config: Arc::new(config),
            catalog,
            dispatcher,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the shared registry catalog.
    pub fn catalog(&self) -> &SharedCatalog {
        &self.catalog
    }

    /// Get the tool dispatcher.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Instructions sent to clients on initialization.
    pub fn instructions() -> &'static str {
        "Answers questions about UI component libraries from their files on disk. \
         Start with list_registries, then get_registry or list_components, and \
         fetch a component's documentation or code examples with \
         get_component_docs / get_component_examples."
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.dispatcher
            .registry()
            .get_all_tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "title": t.title,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// `arguments` must be a JSON object or null.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let arguments = match arguments {
            serde_json::Value::Object(map) => Some(map),
            serde_json::Value::Null => None,
            _ => return Err("Tool arguments must be a JSON object".to_string()),
        };

        let result = self
            .dispatcher
            .invoke(name, arguments)
            .await
            .map_err(|e| e.to_string())?;

        serde_json::to_value(result).map_err(|e| e.to_string())
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(Self::instructions().to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::registries::{Component, Registry};
    use std::path::PathBuf;

    fn server() -> McpServer {
        let mut catalog = RegistryService::new(&[]);
        catalog.add(Registry {
            name: "Demo".to_string(),
            install_command: "npm install demo-ui".to_string(),
            description: "Demo design system".to_string(),
            use_cases: vec![],
            components: vec![Component::new(
                "Button",
                vec![PathBuf::from("/nonexistent/readme.md")],
                vec![],
            )],
        });
        McpServer::with_catalog(Config::default(), Arc::new(RwLock::new(catalog))).unwrap()
    }

    #[test]
    fn test_server_lists_all_tools() {
        let server = server();
        let tools = server.list_tools();
        assert_eq!(tools.len(), 5);
        assert!(
            tools
                .iter()
                .any(|t| t["name"] == "get_component_docs" && t["inputSchema"].is_object())
        );
    }

    #[test]
    fn test_router_matches_registry() {
        let server = server();
        let mut router_names: Vec<_> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        router_names.sort();

        let mut registry_names: Vec<_> = server
            .dispatcher()
            .registry()
            .tool_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        registry_names.sort();

        assert_eq!(router_names, registry_names);
    }

    #[test]
    fn test_get_info_enables_tools_only() {
        let info = server().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.instructions.unwrap().contains("list_registries"));
    }

    #[tokio::test]
    async fn test_call_tool_with_external_argument_names() {
        let server = server();
        let result = server
            .call_tool(
                "get_registry",
                serde_json::json!({ "registryName": "Demo" }),
            )
            .await
            .unwrap();

        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("npm install demo-ui"));
        assert!(text.contains("Button"));
    }

    #[tokio::test]
    async fn test_call_tool_rejects_non_object_arguments() {
        let result = server()
            .call_tool("list_registries", serde_json::json!([1, 2]))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_call_tool_rejects_missing_required_argument() {
        let result = server()
            .call_tool("get_registry", serde_json::json!({}))
            .await;
        assert!(result.unwrap_err().contains("Invalid arguments"));
    }

    fn demo_server(base: &std::path::Path) -> McpServer {
        let write = |rel: &str, content: &str| {
            let path = base.join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, content).unwrap();
        };
        write("demo/components/ui/Button/readme.md", "# Button");
        write("demo/components/ui/Empty/notes.txt", "nothing");
        write("demo/examples/ui/Button/Button.stories.js", "export default {}");
        write(
            "registries.json",
            r#"[{
                "name": "Demo",
                "installCommand": "npm install demo-ui",
                "description": "Demo design system",
                "layout": {
                    "basePath": "demo",
                    "components": { "root": "components", "subDirs": ["ui"], "extensions": [".md"] },
                    "examples": { "root": "examples", "subDirs": ["ui"], "extensions": [".stories.js"] }
                }
            }]"#,
        );

        let mut config = Config::default();
        config.registries =
            crate::core::config::RegistriesConfig::from_file(base.join("registries.json")).unwrap();
        McpServer::new(config).unwrap()
    }

    async fn text_of(server: &McpServer, tool: &str, arguments: serde_json::Value) -> String {
        let result = server.call_tool(tool, arguments).await.unwrap();
        result["content"][0]["text"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_demo_registry_end_to_end() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let base = temp_dir.path();
        let server = demo_server(base);

        let names = text_of(&server, "list_registries", serde_json::json!({})).await;
        let names: Vec<String> = serde_json::from_str(&names).unwrap();
        assert_eq!(names, vec!["Demo"]);

        let components = text_of(
            &server,
            "list_components",
            serde_json::json!({ "registryName": "Demo" }),
        )
        .await;
        let components: serde_json::Value = serde_json::from_str(&components).unwrap();
        assert_eq!(
            components,
            serde_json::json!([{ "name": "Button", "docs": 1, "examples": 1 }])
        );

        let docs = text_of(
            &server,
            "get_component_docs",
            serde_json::json!({ "registryName": "Demo", "componentName": "Button" }),
        )
        .await;
        let readme = base.join("demo/components/ui/Button/readme.md");
        assert_eq!(docs, format!("File: {}\n\n# Button", readme.display()));

        let examples = text_of(
            &server,
            "get_component_examples",
            serde_json::json!({ "registryName": "Demo", "componentName": "Button" }),
        )
        .await;
        assert!(examples.ends_with("export default {}"));
        assert!(examples.contains("Button.stories.js"));
    }

    #[tokio::test]
    async fn test_repeated_calls_are_identical() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let server = demo_server(temp_dir.path());
        let arguments = serde_json::json!({ "registryName": "Demo", "componentName": "Button" });

        let first = server
            .call_tool("get_component_docs", arguments.clone())
            .await
            .unwrap();
        let second = server
            .call_tool("get_component_docs", arguments)
            .await
            .unwrap();
        assert_eq!(first, second);

        let first = server
            .call_tool("list_registries", serde_json::json!({}))
            .await
            .unwrap();
        let second = server
            .call_tool("list_registries", serde_json::json!({}))
            .await
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(first["content"][0]["text"], "[\n  \"Demo\"\n]");
    }

    #[tokio::test]
    async fn test_unknown_names_answer_with_text() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let server = demo_server(temp_dir.path());

        let missing_registry = text_of(
            &server,
            "get_component_docs",
            serde_json::json!({ "registryName": "Nope", "componentName": "Button" }),
        )
        .await;
        assert_eq!(missing_registry, "Registry 'Nope' not found.");

        let missing_component = text_of(
            &server,
            "get_component_examples",
            serde_json::json!({ "registryName": "Demo", "componentName": "Empty" }),
        )
        .await;
        assert_eq!(
            missing_component,
            "Component 'Empty' not found in registry 'Demo'."
        );
    }
}
