//! Tool-specific error types.

use thiserror::Error;

/// Errors that can occur while registering or dispatching tools.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The tool execution failed.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// Two tools were registered under the same name.
    #[error("Duplicate tool name: {0}")]
    DuplicateName(String),

    /// A tool's input schema could not be compiled.
    #[error("Invalid input schema for tool '{tool}': {message}")]
    InvalidSchema { tool: String, message: String },
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "execution failed" error.
    pub fn execution_failed(msg: impl Into<String>) -> Self {
        Self::ExecutionFailed(msg.into())
    }

    /// Create a new "duplicate name" error.
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName(name.into())
    }

    /// Create a new "invalid schema" error.
    pub fn invalid_schema(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSchema {
            tool: tool.into(),
            message: message.into(),
        }
    }
}
