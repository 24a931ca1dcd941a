//! Tool Registry - central registration of all tools.
//!
//! This module provides:
//! - `ToolDescriptor`: name, schema, parameter map and handler of one tool
//! - `ToolProvider`: the seam through which a service contributes its tools
//! - `ToolRegistry`: the read-only table built once at startup
//!
//! Tool names are unique across the whole table. Registering a second tool
//! under an existing name is a configuration error, which also covers
//! registering the same provider twice.

use futures::FutureExt;
use futures::future::BoxFuture;
use jsonschema::{Draft, JSONSchema};
use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info};

use super::error::ToolError;

// ============================================================================
// Tool Replies
// ============================================================================

/// What a tool handler hands back to the dispatcher.
#[derive(Debug, Clone)]
pub enum ToolReply {
    /// A ready-made protocol response, passed through unchanged.
    Envelope(CallToolResult),

    /// Plain data, wrapped into a single text block by the dispatcher.
    Data(Value),
}

impl ToolReply {
    /// A plain text reply.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Data(Value::String(text.into()))
    }

    /// Serialize any value into a data reply.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, ToolError> {
        serde_json::to_value(value)
            .map(Self::Data)
            .map_err(|e| ToolError::execution_failed(e.to_string()))
    }
}

impl From<CallToolResult> for ToolReply {
    fn from(result: CallToolResult) -> Self {
        Self::Envelope(result)
    }
}

impl From<Value> for ToolReply {
    fn from(value: Value) -> Self {
        Self::Data(value)
    }
}

impl From<String> for ToolReply {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

/// Future returned by a tool handler.
pub type ToolFuture = BoxFuture<'static, Result<ToolReply, ToolError>>;

/// Type-erased tool handler. Receives the transformed argument, `None` when
/// the call carried no arguments.
pub type ToolHandler = Arc<dyn Fn(Option<Value>) -> ToolFuture + Send + Sync>;

// ============================================================================
// Parameter Maps
// ============================================================================

/// Renames external argument names to the handler's parameter names.
///
/// Entries keep their declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamMap {
    entries: Vec<(String, String)>,
}

impl ParamMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map the external argument `external` to the parameter `internal`.
    pub fn with(mut self, external: impl Into<String>, internal: impl Into<String>) -> Self {
        self.entries.push((external.into(), internal.into()));
        self
    }

    /// `(external, internal)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(ext, internal)| (ext.as_str(), internal.as_str()))
    }
}

// ============================================================================
// Tool Descriptors
// ============================================================================

/// Everything needed to expose and invoke one tool.
#[derive(Clone)]
pub struct ToolDescriptor {
    name: String,
    title: Option<String>,
    description: Option<String>,
    input_schema: Arc<JsonObject>,
    param_map: Option<ParamMap>,
    handler: ToolHandler,
}

impl ToolDescriptor {
    /// Create a descriptor whose input schema is generated from `P`.
    pub fn new<P, F, Fut>(name: impl Into<String>, handler: F) -> Self
    where
        P: JsonSchema + 'static,
        F: Fn(Option<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ToolReply, ToolError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            title: None,
            description: None,
            input_schema: cached_schema_for_type::<P>(),
            param_map: None,
            handler: Arc::new(move |argument| handler(argument).boxed()),
        }
    }

    /// Set the human-readable title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description shown to clients.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declare how external argument names map to parameter names.
    pub fn with_param_map(mut self, param_map: ParamMap) -> Self {
        self.param_map = Some(param_map);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn param_map(&self) -> Option<&ParamMap> {
        self.param_map.as_ref()
    }

    pub fn handler(&self) -> &ToolHandler {
        &self.handler
    }

    /// Create a Tool model for this descriptor (metadata).
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.clone().into(),
            description: self.description.clone().map(Into::into),
            input_schema: self.input_schema.clone(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: self.title.clone(),
        }
    }
}

impl std::fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("title", &self.title)
            .field("param_map", &self.param_map)
            .finish_non_exhaustive()
    }
}

/// A service that exposes tools.
pub trait ToolProvider {
    /// Name used in logs.
    fn provider_name(&self) -> &str;

    /// The provider's tools, in registration order.
    fn tools(&self) -> Vec<ToolDescriptor>;
}

// ============================================================================
// Tool Registry
// ============================================================================

/// A descriptor together with its compiled input validator.
pub struct RegisteredTool {
    descriptor: ToolDescriptor,
    validator: JSONSchema,
}

impl RegisteredTool {
    fn compile(descriptor: ToolDescriptor) -> Result<Self, ToolError> {
        let schema = Value::Object(descriptor.input_schema.as_ref().clone());
        let validator = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema)
            .map_err(|e| ToolError::invalid_schema(descriptor.name(), e.to_string()))?;

        Ok(Self {
            descriptor,
            validator,
        })
    }

    pub fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    /// Check raw call arguments against the tool's input schema.
    pub fn validate(&self, arguments: &JsonObject) -> Result<(), ToolError> {
        let instance = Value::Object(arguments.clone());
        if let Err(errors) = self.validator.validate(&instance) {
            let details = errors
                .map(|err| err.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ToolError::invalid_arguments(details));
        }
        Ok(())
    }
}

/// Read-only table of every registered tool.
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Start building a registry.
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&RegisteredTool> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    /// Get all tool names, in registration order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.descriptor.name()).collect()
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools(&self) -> Vec<Tool> {
        self.tools.iter().map(|t| t.descriptor.to_tool()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Collects descriptors and rejects name collisions.
#[derive(Default)]
pub struct ToolRegistryBuilder {
    tools: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl ToolRegistryBuilder {
    /// Register one descriptor.
    pub fn register(mut self, descriptor: ToolDescriptor) -> Result<Self, ToolError> {
        if self.index.contains_key(descriptor.name()) {
            return Err(ToolError::duplicate_name(descriptor.name()));
        }

        debug!("Registering tool: {}", descriptor.name());
        let tool = RegisteredTool::compile(descriptor)?;
        self.index
            .insert(tool.descriptor.name().to_string(), self.tools.len());
        self.tools.push(tool);
        Ok(self)
    }

    /// Register every tool of a provider.
    pub fn provider(self, provider: &dyn ToolProvider) -> Result<Self, ToolError> {
        let tools = provider.tools();
        info!(
            "Registering {} tools from {}",
            tools.len(),
            provider.provider_name()
        );
        tools
            .into_iter()
            .try_fold(self, |builder, descriptor| builder.register(descriptor))
    }

    /// Freeze the table.
    pub fn build(self) -> ToolRegistry {
        ToolRegistry {
            tools: self.tools,
            index: self.index,
        }
    }
}
