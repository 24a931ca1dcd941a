//! Tool Dispatcher - validates, transforms, invokes and normalizes tool calls.
//!
//! A call moves through these steps:
//!
//! 1. look up the tool and validate the raw arguments against its schema
//! 2. transform the arguments into the single value the handler receives
//! 3. invoke the handler
//! 4. normalize the reply (or the failure) into a `CallToolResult`
//!
//! Only an unknown tool name or a schema rejection is returned as `Err`.
//! Anything that goes wrong inside the handler, including a panic, becomes
//! an error result carrying the failure message.

use futures::FutureExt;
use rmcp::model::{CallToolResult, Content, JsonObject};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use super::error::ToolError;
use super::registry::{ParamMap, ToolRegistry, ToolReply};

/// Dispatches calls against a frozen tool registry.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    /// Create a dispatcher over the given registry.
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// The registry this dispatcher serves.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Run one tool call to completion.
    #[instrument(skip(self, arguments))]
    pub async fn invoke(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, ToolError> {
        let Some(tool) = self.registry.get(name) else {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::not_found(name));
        };

        let arguments = arguments.unwrap_or_default();
        if let Err(e) = tool.validate(&arguments) {
            warn!("Rejected arguments for '{}': {}", name, e);
            return Err(e);
        }

        let argument = transform_arguments(arguments, tool.descriptor().param_map());
        let handler = tool.descriptor().handler().clone();

        info!("Invoking tool: {}", name);
        let outcome = AssertUnwindSafe(async move { handler(argument).await })
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(reply)) => Ok(normalize_reply(reply)),
            Ok(Err(e)) => {
                error!("Tool '{}' failed: {}", name, e);
                Ok(CallToolResult::error(vec![Content::text(e.to_string())]))
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!("Tool '{}' panicked: {}", name, message);
                Ok(CallToolResult::error(vec![Content::text(format!(
                    "Execution failed: {}",
                    message
                ))]))
            }
        }
    }
}

/// Turn validated call arguments into the value passed to a handler.
///
/// - no keys: `None`
/// - with a parameter map, keys are renamed and unmapped keys dropped
/// - exactly one key (after mapping): that key's value
/// - otherwise: the whole object
pub fn transform_arguments(arguments: JsonObject, param_map: Option<&ParamMap>) -> Option<Value> {
    let arguments: JsonObject = match param_map {
        Some(map) => {
            let mut source = arguments;
            map.iter()
                .filter_map(|(external, internal)| {
                    source
                        .remove(external)
                        .map(|value| (internal.to_string(), value))
                })
                .collect()
        }
        None => arguments,
    };

    match arguments.len() {
        0 => None,
        1 => arguments.into_iter().next().map(|(_, value)| value),
        _ => Some(Value::Object(arguments)),
    }
}

/// Decode a transformed argument into a handler's parameter type.
///
/// A missing argument decodes as JSON `null`.
pub fn decode_argument<T: DeserializeOwned>(argument: Option<Value>) -> Result<T, ToolError> {
    serde_json::from_value(argument.unwrap_or(Value::Null))
        .map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Wrap a handler reply into a protocol response.
pub fn normalize_reply(reply: ToolReply) -> CallToolResult {
    match reply {
        ToolReply::Envelope(result) => result,
        ToolReply::Data(value) => {
            if let Some(result) = as_envelope(&value) {
                return result;
            }

            let text = match value {
                Value::String(text) => text,
                other => serde_json::to_string_pretty(&other).unwrap_or_else(|_| other.to_string()),
            };
            CallToolResult::success(vec![Content::text(text)])
        }
    }
}

/// Data that is already shaped like a `CallToolResult`.
fn as_envelope(value: &Value) -> Option<CallToolResult> {
    if !value.get("content").is_some_and(Value::is_array) {
        return None;
    }
    serde_json::from_value(value.clone()).ok()
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "tool panicked".to_string()
    }
}
